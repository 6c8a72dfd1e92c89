use gridquad::callbacks::SimpleCallback;
use gridquad::config::Settings;
use gridquad::distributions::Normal;
use gridquad::grid;
use gridquad::integrators::expected::expected_value_fixed_with_callback;
use gridquad::print::print_matrix;

use std::env;
use std::process;

/// Samples a Gaussian bump on a small grid and computes a few moments of the normal
/// distribution. An optional JSON settings file may be passed as the first argument.
fn main() {
    let settings = match env::args().nth(1) {
        Some(path) => Settings::from_file(&path).unwrap_or_else(|err| {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }),
        None => Settings::default(),
    };

    let x = [-1.0, -0.5, 0.0, 0.5, 1.0];
    let y = [-1.0, 0.0, 1.0];
    let bump = grid::sample_with_callback(
        &x,
        &y,
        |x: f64, y: f64| (-(x * x + y * y)).exp(),
        settings.concurrency,
        &SimpleCallback {},
    );
    print_matrix("bump", &bump);

    let q = Normal::new(0.0, 1.0).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });

    for k in 1..=4 {
        expected_value_fixed_with_callback(
            |x: f64| x.powi(k),
            &q,
            settings.evals,
            settings.concurrency,
            &SimpleCallback {},
        );
    }

    let palette = settings.palette();
    for (i, color) in palette.colors().iter().take(3).enumerate() {
        println!("series {}: #{:02x}{:02x}{:02x}", i, color.r, color.g, color.b);
    }
}
