//! Fixed-order quadrature with optional concurrency.
use crate::core::{calls_for_worker, cast, offset_for_worker};

use crossbeam as cb;
use num_traits::Float;
use std::f64::consts::PI;
use std::panic;

/// A quadrature rule with a fixed number of nodes.
pub trait Rule<T> {
    /// Fills `x` with the nodes of the rule on the interval $[\mathrm{min}, \mathrm{max}]$ and
    /// `weight` with the corresponding weights. The length of the slices is the order of the
    /// rule.
    fn fixed_locations(&self, x: &mut [T], weight: &mut [T], min: T, max: T);
}

/// Gauss-Legendre quadrature.
///
/// A rule with $n$ nodes integrates polynomials up to degree $2n - 1$ exactly. The nodes lie
/// strictly inside the interval and are returned in ascending order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Legendre;

/// Returns $P_n(z)$ and $P_n'(z)$ using the three-term recurrence.
fn legendre<T: Float>(n: usize, z: T) -> (T, T) {
    let mut p1 = T::one();
    let mut p2 = T::zero();

    for j in 0..n {
        let p3 = p2;
        let j: T = cast(j);
        p2 = p1;
        p1 = ((j + j + T::one()) * z * p2 - j * p3) / (j + T::one());
    }

    let n: T = cast(n);
    (p1, n * (z * p1 - p2) / (z * z - T::one()))
}

impl<T: Float> Rule<T> for Legendre {
    fn fixed_locations(&self, x: &mut [T], weight: &mut [T], min: T, max: T) {
        assert_eq!(x.len(), weight.len(), "quadrature: length mismatch");

        let n = x.len();
        let two = T::one() + T::one();
        let half_width = (max - min) / two;
        let center = (max + min) / two;
        let tolerance = T::epsilon() * cast(16);

        for i in 0..(n + 1) / 2 {
            let mut z: T = cast((PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos());

            if n % 2 == 1 && i == n / 2 {
                // the middle node of an odd rule is exactly the center
                z = T::zero();
            } else {
                for _ in 0..100 {
                    let (p, dp) = legendre(n, z);
                    let step = p / dp;
                    z = z - step;

                    if step.abs() <= tolerance {
                        break;
                    }
                }
            }

            let (_, dp) = legendre(n, z);
            let w = two / ((T::one() - z * z) * dp * dp) * half_width;

            x[i] = center - half_width * z;
            x[n - 1 - i] = center + half_width * z;
            weight[i] = w;
            weight[n - 1 - i] = w;
        }
    }
}

/// Integrates `f` from `min` to `max` with an `n`-point Gauss-Legendre rule.
///
/// See [`fixed_with_rule`] for the meaning of the other arguments.
pub fn fixed<T, F>(f: F, min: T, max: T, n: usize, concurrency: usize) -> T
where
    T: Float + Send + Sync,
    F: Fn(T) -> T + Sync,
{
    fixed_with_rule(f, min, max, n, &Legendre, concurrency)
}

/// Integrates `f` from `min` to `max` using the `n`-point quadrature `rule`.
///
/// Infinite bounds are supported by changing variables to a finite interval:
///
/// - $(-\infty, \infty)$: $x = t / (1 - t^2)$ with $t \in (-1, 1)$,
/// - $[a, \infty)$: $x = a + t / (1 - t)$ with $t \in [0, 1)$,
/// - $(-\infty, b]$: $x = b + t / (1 + t)$ with $t \in (-1, 0]$.
///
/// With `concurrency <= 1` the nodes are evaluated on the calling thread, otherwise they are split
/// into contiguous blocks on `min(concurrency, n)` threads. The partial sums are added in block
/// order, so the result does not depend on thread scheduling.
///
/// # Panics
///
/// Panics if `n` is zero or if `min > max`.
pub fn fixed_with_rule<T, F, R>(f: F, min: T, max: T, n: usize, rule: &R, concurrency: usize) -> T
where
    T: Float + Send + Sync,
    F: Fn(T) -> T + Sync,
    R: Rule<T> + ?Sized,
{
    assert!(n > 0, "quadrature: number of locations must be positive");
    assert!(min <= max || min.is_nan() || max.is_nan(), "quadrature: min > max");

    if min == max {
        return T::zero();
    }

    let one = T::one();
    let f = &f;

    match (min.is_infinite(), max.is_infinite()) {
        (true, true) => weighted_sum(
            |t| {
                let t2 = t * t;
                let d = one - t2;
                f(t / d) * (one + t2) / (d * d)
            },
            -one,
            one,
            n,
            rule,
            concurrency,
        ),
        (false, true) => weighted_sum(
            |t| {
                let d = one - t;
                f(min + t / d) / (d * d)
            },
            T::zero(),
            one,
            n,
            rule,
            concurrency,
        ),
        (true, false) => weighted_sum(
            |t| {
                let d = one + t;
                f(max + t / d) / (d * d)
            },
            -one,
            T::zero(),
            n,
            rule,
            concurrency,
        ),
        (false, false) => weighted_sum(f, min, max, n, rule, concurrency),
    }
}

fn weighted_sum<T, G, R>(g: G, min: T, max: T, n: usize, rule: &R, concurrency: usize) -> T
where
    T: Float + Send + Sync,
    G: Fn(T) -> T + Sync,
    R: Rule<T> + ?Sized,
{
    let mut x = vec![T::zero(); n];
    let mut weight = vec![T::zero(); n];
    rule.fixed_locations(&mut x, &mut weight, min, max);

    if concurrency <= 1 {
        return partial_sum(&g, &x, &weight);
    }

    let workers = concurrency.min(n);
    let g = &g;

    cb::thread::scope(|s| {
        let handles = (0..workers)
            .map(|worker| {
                let start = offset_for_worker(worker, workers, n);
                let end = start + calls_for_worker(worker, workers, n);
                let (xs, ws) = (&x[start..end], &weight[start..end]);

                s.spawn(move |_| partial_sum(g, xs, ws))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .fold(T::zero(), |acc, partial| acc + partial)
    })
    .unwrap_or_else(|err| panic::resume_unwind(err))
}

fn partial_sum<T: Float, G: Fn(T) -> T>(g: &G, x: &[T], weight: &[T]) -> T {
    x.iter()
        .zip(weight)
        .fold(T::zero(), |acc, (&x, &w)| acc + w * g(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const TOLERANCE: f64 = 1e-12;

    fn nodes(n: usize, min: f64, max: f64) -> (Vec<f64>, Vec<f64>) {
        let mut x = vec![0.0; n];
        let mut w = vec![0.0; n];
        Legendre.fixed_locations(&mut x, &mut w, min, max);
        (x, w)
    }

    #[test]
    fn test_legendre_known_nodes() {
        let (x, w) = nodes(2, -1.0, 1.0);
        assert_approx_eq!(x[0], -1.0 / 3f64.sqrt(), TOLERANCE);
        assert_approx_eq!(x[1], 1.0 / 3f64.sqrt(), TOLERANCE);
        assert_approx_eq!(w[0], 1.0, TOLERANCE);
        assert_approx_eq!(w[1], 1.0, TOLERANCE);

        let (x, w) = nodes(3, -1.0, 1.0);
        assert_approx_eq!(x[0], -(0.6f64).sqrt(), TOLERANCE);
        assert_eq!(x[1], 0.0);
        assert_approx_eq!(w[0], 5.0 / 9.0, TOLERANCE);
        assert_approx_eq!(w[1], 8.0 / 9.0, TOLERANCE);
    }

    #[test]
    fn test_legendre_single_node() {
        let (x, w) = nodes(1, 2.0, 4.0);
        assert_eq!(x, vec![3.0]);
        assert_approx_eq!(w[0], 2.0, TOLERANCE);
    }

    #[test]
    fn test_legendre_weights_and_symmetry() {
        for &n in &[1, 4, 7, 50, 201] {
            let (x, w) = nodes(n, -1.0, 1.0);

            assert_approx_eq!(w.iter().sum::<f64>(), 2.0, 1e-12);
            assert!(x.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(x.iter().all(|&x| x > -1.0 && x < 1.0));

            for i in 0..n {
                assert_eq!(x[i], -x[n - 1 - i]);
                assert_eq!(w[i], w[n - 1 - i]);
            }
        }

        let (_, w) = nodes(10, 0.0, 0.25);
        assert_approx_eq!(w.iter().sum::<f64>(), 0.25, 1e-14);
    }

    #[test]
    fn test_polynomial_exact() {
        // a 3-point rule integrates polynomials up to degree 5 exactly
        assert_approx_eq!(fixed(|x: f64| x.powi(5), 0.0, 1.0, 3, 1), 1.0 / 6.0, TOLERANCE);
        assert_approx_eq!(
            fixed(|x: f64| x.powi(5) - 2.0 * x.powi(4) + 1.0, -1.0, 1.0, 3, 1),
            6.0 / 5.0,
            TOLERANCE
        );
    }

    #[test]
    fn test_concurrent_matches_sequential() {
        let f = |x: f64| (x + 1.0).ln().sin();
        let sequential = fixed(f, 0.0, 1.0, 97, 1);

        for concurrency in &[2, 3, 8, 200] {
            assert_approx_eq!(fixed(f, 0.0, 1.0, 97, *concurrency), sequential, TOLERANCE);
        }

        assert_approx_eq!(
            sequential,
            0.5 - 2f64.ln().cos() + 2f64.ln().sin(),
            TOLERANCE
        );
    }

    #[test]
    fn test_infinite_bounds() {
        let density = |x: f64| (-0.5 * x * x).exp() / (2.0 * PI).sqrt();

        assert_approx_eq!(fixed(|x: f64| (-x).exp(), 0.0, f64::INFINITY, 100, 1), 1.0, 1e-6);
        assert_approx_eq!(
            fixed(|x: f64| x.exp(), f64::NEG_INFINITY, 0.0, 100, 1),
            1.0,
            1e-6
        );
        assert_approx_eq!(
            fixed(density, f64::NEG_INFINITY, f64::INFINITY, 100, 4),
            1.0,
            1e-6
        );
    }

    #[test]
    fn test_empty_interval() {
        assert_eq!(fixed(|_: f64| 1.0, 2.0, 2.0, 10, 1), 0.0);
    }

    #[test]
    #[should_panic(expected = "number of locations must be positive")]
    fn test_zero_nodes() {
        let _ = fixed(|x: f64| x, 0.0, 1.0, 0, 1);
    }

    #[test]
    #[should_panic(expected = "min > max")]
    fn test_reversed_bounds() {
        let _ = fixed(|x: f64| x, 1.0, 0.0, 10, 1);
    }
}
