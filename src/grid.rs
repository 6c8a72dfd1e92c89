//! Sampling of functions on rectangular grids.
use crate::callbacks::{Callback, SinkCallback};
use crate::core::parallel::map_2d;
use crate::core::reports::SamplingReport;
use crate::core::{GridXyz, MatrixLike};

use nalgebra::{DMatrix, Scalar};
use serde::{Deserialize, Serialize};

/// A function sampled on a rectangular grid, stored in a matrix.
///
/// The x-coordinates belong to the columns and the y-coordinates to the rows of the matrix, so the
/// value in row `r` and column `c` is the function evaluated at `(x[c], y[r])`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Grid<T: Scalar> {
    data: DMatrix<T>,
    x: Vec<T>,
    y: Vec<T>,
}

impl<T: Scalar> Grid<T> {
    /// Assembles a grid from its coordinates and values.
    ///
    /// The number of rows of `data` must equal `y.len()` and the number of columns `x.len()`.
    /// This is not checked here but on every call to [`GridXyz::dims`].
    pub fn new(x: Vec<T>, y: Vec<T>, data: DMatrix<T>) -> Self {
        Self { data, x, y }
    }

    /// Returns the matrix of sampled values.
    pub fn data(&self) -> &DMatrix<T> {
        &self.data
    }

    /// Returns the x-coordinates, one per column.
    pub fn x_locations(&self) -> &[T] {
        &self.x
    }

    /// Returns the y-coordinates, one per row.
    pub fn y_locations(&self) -> &[T] {
        &self.y
    }
}

impl<T: Scalar + Copy> GridXyz<T> for Grid<T> {
    /// # Panics
    ///
    /// Panics if the matrix dimensions disagree with the number of coordinates.
    fn dims(&self) -> (usize, usize) {
        let (r, c) = (self.data.nrows(), self.data.ncols());

        if self.x.len() != c {
            panic!("bad x size");
        }

        if self.y.len() != r {
            panic!("bad y size");
        }

        (c, r)
    }

    fn z(&self, c: usize, r: usize) -> T {
        self.data[(r, c)]
    }

    fn x(&self, c: usize) -> T {
        self.x[c]
    }

    fn y(&self, r: usize) -> T {
        self.y[r]
    }
}

impl<T: Scalar + Copy> MatrixLike<T> for Grid<T> {
    fn shape(&self) -> (usize, usize) {
        (self.data.nrows(), self.data.ncols())
    }

    fn at(&self, r: usize, c: usize) -> T {
        self.data[(r, c)]
    }
}

/// Samples `f` on the grid spanned by `x` and `y`.
///
/// The value in row `i` and column `j` is `f(x[j], y[i])`. With `concurrency <= 1` the function is
/// evaluated sequentially, otherwise `concurrency` worker threads share the evaluations. The grid
/// keeps its own copies of `x` and `y`. Empty coordinates are allowed and give an empty grid
/// without calling `f`.
pub fn sample<T, F>(x: &[T], y: &[T], f: F, concurrency: usize) -> Grid<T>
where
    T: Scalar + Copy + Default + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    sample_with_callback(x, y, f, concurrency, &SinkCallback {})
}

/// Same as [`sample`], but reports a [`SamplingReport`] to `callback` once the grid is complete.
pub fn sample_with_callback<T, F>(
    x: &[T],
    y: &[T],
    f: F,
    concurrency: usize,
    callback: &impl Callback<SamplingReport>,
) -> Grid<T>
where
    T: Scalar + Copy + Default + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let (rows, cols) = (y.len(), x.len());
    let (values, per_worker) = map_2d(rows, cols, concurrency, |i, j| f(x[j], y[i]));

    callback.print(&SamplingReport::new(rows, cols, per_worker));

    Grid::new(
        x.to_vec(),
        y.to_vec(),
        DMatrix::from_row_iterator(rows, cols, values),
    )
}
