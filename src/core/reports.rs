//! Summaries of finished runs, handed to callbacks.
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Summary of a grid sampling run.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SamplingReport {
    rows: usize,
    cols: usize,
    per_worker: Vec<usize>,
}

impl SamplingReport {
    /// Constructor.
    pub(crate) fn new(rows: usize, cols: usize, per_worker: Vec<usize>) -> Self {
        Self {
            rows,
            cols,
            per_worker,
        }
    }

    /// Returns the number of rows of the sampled grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns of the sampled grid.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of workers that evaluated the function.
    pub fn workers(&self) -> usize {
        self.per_worker.len()
    }

    /// Returns how many evaluations each worker performed.
    pub fn per_worker(&self) -> &[usize] {
        &self.per_worker
    }

    /// Returns the total number of function evaluations.
    pub fn evaluations(&self) -> usize {
        self.per_worker.iter().sum()
    }
}

impl Display for SamplingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sampled {}x{} grid: N={} on {} worker(s) {:?}",
            self.rows,
            self.cols,
            self.evaluations(),
            self.workers(),
            self.per_worker
        )
    }
}

/// Summary of an expected-value integration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct IntegrationReport<T> {
    evals: usize,
    workers: usize,
    value: T,
}

impl<T: Copy> IntegrationReport<T> {
    /// Constructor.
    pub(crate) const fn new(evals: usize, workers: usize, value: T) -> Self {
        Self {
            evals,
            workers,
            value,
        }
    }

    /// Returns the number of quadrature points.
    pub fn evals(&self) -> usize {
        self.evals
    }

    /// Returns the number of workers the quadrature was split across.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the estimated expected value.
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Display> Display for IntegrationReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected value: N={} E={} on {} worker(s)",
            self.evals, self.value, self.workers
        )
    }
}
