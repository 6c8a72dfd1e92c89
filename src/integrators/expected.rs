//! Expected values of functions under probability distributions.
use crate::callbacks::Callback;
use crate::core::reports::IntegrationReport;
use crate::core::Quantile;
use crate::integrators::fixed::fixed;

use num_traits::Float;

/// Computes the expected value $E[f(X)]$ where $X$ is distributed according to `q`, using `evals`
/// quadrature points split across `concurrency` threads.
///
/// Substituting $x = Q(p)$, with $Q$ the quantile function of the distribution, transforms
///
/// $$ \int \mathrm{d}x \, f(x) \, \rho(x) = \int_0^1 \mathrm{d}p \, f(Q(p)) $$
///
/// and the right-hand side is integrated with a fixed-order Gauss-Legendre rule. The quantile
/// function must be defined on $(0, 1)$; the endpoints themselves are never evaluated.
///
/// # Panics
///
/// Panics if `evals` is zero.
pub fn expected_value_fixed<T, F, Q>(f: F, q: &Q, evals: usize, concurrency: usize) -> T
where
    T: Float + Send + Sync,
    F: Fn(T) -> T + Sync,
    Q: Quantile<T> + Sync + ?Sized,
{
    // integrating f(x) times the density over x has a larger error for the same number of
    // quadrature points
    fixed(|p| f(q.quantile(p)), T::zero(), T::one(), evals, concurrency)
}

/// Same as [`expected_value_fixed`], but reports an [`IntegrationReport`] to `callback`.
pub fn expected_value_fixed_with_callback<T, F, Q>(
    f: F,
    q: &Q,
    evals: usize,
    concurrency: usize,
    callback: &impl Callback<IntegrationReport<T>>,
) -> T
where
    T: Float + Send + Sync,
    F: Fn(T) -> T + Sync,
    Q: Quantile<T> + Sync + ?Sized,
{
    let value = expected_value_fixed(f, q, evals, concurrency);
    let workers = if concurrency <= 1 {
        1
    } else {
        concurrency.min(evals)
    };

    callback.print(&IntegrationReport::new(evals, workers, value));

    value
}
