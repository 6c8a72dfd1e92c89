//! Pretty printing of matrices.
use crate::core::MatrixLike;
use num_traits::ToPrimitive;

/// Number of significant digits used when printing matrices.
pub const SIGNIFICANT_DIGITS: usize = 4;

/// Formats `value` with `digits` significant digits.
///
/// Follows the rules of the `%g` verb of C's `printf`: numbers whose decimal exponent is smaller
/// than -4 or at least `digits` are written in scientific notation with a signed exponent of at
/// least two digits, all others in fixed notation. Trailing zeros are removed.
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);

    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // the exponent has to be taken after rounding, 9999.7 becomes 1e+04
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_at(scientific.find('e').unwrap_or(scientific.len()));
    let exponent: i32 = exponent.trim_start_matches('e').parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        format!(
            "{}e{}{:02}",
            trim_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Formats `m` with [`SIGNIFICANT_DIGITS`] significant digits, preceded by a line with `name` if
/// it is not empty.
///
/// Columns are right-aligned and separated by two spaces. A single row is enclosed in square
/// brackets, taller matrices in bracket pieces:
///
/// ```text
/// ⎡1  -2.5⎤
/// ⎢3     4⎥
/// ⎣5     6⎦
/// ```
pub fn format_matrix<T, M>(name: &str, m: &M) -> String
where
    T: ToPrimitive,
    M: MatrixLike<T> + ?Sized,
{
    let mut out = String::new();

    if !name.is_empty() {
        out.push_str(name);
        out.push_str(":\n");
    }

    let (rows, cols) = m.shape();

    if rows == 0 || cols == 0 {
        out.push_str("[]");
        return out;
    }

    let cells = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let value = m.at(r, c).to_f64().unwrap_or(f64::NAN);
                    format_significant(value, SIGNIFICANT_DIGITS)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let widths = (0..cols)
        .map(|c| cells.iter().map(|row| row[c].chars().count()).max().unwrap_or(0))
        .collect::<Vec<_>>();

    for (r, row) in cells.iter().enumerate() {
        let (left, right) = match (r, rows) {
            (_, 1) => ('[', ']'),
            (0, _) => ('⎡', '⎤'),
            (r, rows) if r + 1 == rows => ('⎣', '⎦'),
            _ => ('⎢', '⎥'),
        };

        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");

        if r > 0 {
            out.push('\n');
        }
        out.push(left);
        out.push_str(&line);
        out.push(right);
    }

    out
}

/// Prints `m` to the standard output, see [`format_matrix`].
pub fn print_matrix<T, M>(name: &str, m: &M)
where
    T: ToPrimitive,
    M: MatrixLike<T> + ?Sized,
{
    println!("{}", format_matrix(name, m));
}
