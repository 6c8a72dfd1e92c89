#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! The crate `gridquad` collects small numeric helpers for plotting and statistical analysis:
//! sampling functions on rectangular grids, computing expected values with fixed-order
//! quadrature, printing matrices and choosing plot colors.
//!
//! # Features
//!
//! - **Concurrent grid sampling**. [`grid::sample`] evaluates a function $f(x, y)$ on every point
//! of the grid spanned by two coordinate sequences, optionally on a pool of worker threads that
//! share a work queue. The result is a [`grid::Grid`] backed by an `nalgebra` matrix, which
//! implements [`GridXyz`], the interface plotting code expects from gridded data.
//! - **Expected values**. Given
//!
//! $$ E[f(X)] = \int \mathrm{d}x \, f(x) \, \rho(x) $$
//!
//! [`integrators::expected::expected_value_fixed`] substitutes $x = Q(p)$, where $Q$ is the
//! quantile function of the distribution, and integrates $f(Q(p))$ over $p \in [0, 1]$ with a
//! Gauss-Legendre rule. This avoids wasting quadrature points in regions of low probability.
//! - **Generic numeric type**. Grids, integrals and the distributions in [`distributions`] work
//! with `f32`, `f64`, or any custom type implementing the `Float` trait from the `num-traits`
//! crate.
//! - **Reproducibility**. Concurrent and sequential runs give the same grids. The color
//! [`palette::Palette`] is generated from a fixed seed and therefore identical in every run.
//! - **Callbacks**. Runs can report a summary to a [`callbacks::Callback`], which may print it,
//! write it to a file or ignore it.

pub mod callbacks;
pub mod config;
pub mod core;
pub mod distributions;
pub mod grid;
pub mod integrators;
pub mod palette;
pub mod print;

pub use crate::core::*;
