//! Numerical integration routines.
pub mod expected;
pub mod fixed;
