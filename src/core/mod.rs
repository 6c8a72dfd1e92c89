//! Core traits and helpers. You don't need to import this module since all its public members are
//! part of the crate namespace.
pub mod parallel;
pub mod reports;

pub use parallel::map_2d;
pub use reports::{IntegrationReport, SamplingReport};

use nalgebra::{DMatrix, Scalar};
use num_traits::{Float, NumCast, ToPrimitive};

/// A probability distribution that exposes its quantile function, i.e. the inverse of its
/// cumulative distribution function.
pub trait Quantile<T> {
    /// Returns the value $x$ for which $P(X \le x) = p$, where $p \in [0, 1]$.
    fn quantile(&self, p: T) -> T;
}

impl<T, Q: Quantile<T> + ?Sized> Quantile<T> for &Q {
    fn quantile(&self, p: T) -> T {
        (**self).quantile(p)
    }
}

/// Data source for plots of a function sampled on a rectangular grid.
///
/// Columns run along the x-axis and rows along the y-axis.
pub trait GridXyz<T> {
    /// Returns the number of columns and rows, in that order.
    fn dims(&self) -> (usize, usize);

    /// Returns the value in column `c` and row `r`.
    fn z(&self, c: usize, r: usize) -> T;

    /// Returns the x-coordinate of column `c`.
    fn x(&self, c: usize) -> T;

    /// Returns the y-coordinate of row `r`.
    fn y(&self, r: usize) -> T;
}

/// Anything that can be read like a dense matrix.
pub trait MatrixLike<T> {
    /// Returns the number of rows and columns, in that order.
    fn shape(&self) -> (usize, usize);

    /// Returns the element in row `r` and column `c`.
    fn at(&self, r: usize, c: usize) -> T;
}

impl<T: Scalar + Copy> MatrixLike<T> for DMatrix<T> {
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    fn at(&self, r: usize, c: usize) -> T {
        self[(r, c)]
    }
}

/// Converts a primitive number into `T`, giving NaN if it is not representable.
pub(crate) fn cast<T: Float, N: ToPrimitive>(n: N) -> T {
    <T as NumCast>::from(n).unwrap_or_else(T::nan)
}

/// Compute the number of items handled by `worker` (zero-based) when `total` items are split
/// across `workers` workers. The first `total % workers` workers get one extra item.
pub(crate) fn calls_for_worker(worker: usize, workers: usize, total: usize) -> usize {
    debug_assert!(worker < workers);
    let base = total / workers;

    if worker < total % workers {
        base + 1
    } else {
        base
    }
}

/// Index of the first item handled by `worker`, consistent with [`calls_for_worker`].
pub(crate) fn offset_for_worker(worker: usize, workers: usize, total: usize) -> usize {
    debug_assert!(worker < workers);
    worker * (total / workers) + worker.min(total % workers)
}
