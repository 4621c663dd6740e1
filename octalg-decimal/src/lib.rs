//! High-precision real functions evaluated under an explicit [`MathContext`].
//!
//! Every inexact result is rounded to the context's precision; intermediate
//! series carry a few guard digits.
#![warn(missing_docs)]
#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

mod context;
mod error;
mod exponential;
mod trigonometric;

pub use bigdecimal::{BigDecimal, RoundingMode};
pub use context::{DEFAULT_PRECISION, GUARD_DIGITS, MathContext};
pub use error::{DecimalError, Result};
