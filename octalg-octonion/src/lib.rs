//! Octonions with arbitrary-precision decimal components.
//!
//! [`OctonionValue`] is plain data; [`OctonionAlgebra`] carries the
//! [`MathContext`](octalg_decimal::MathContext) every rounded operation uses.
#![warn(missing_docs)]
#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// the octonion algebra object
pub mod algebra;
pub mod complex;
pub mod table;
mod transcendental;
/// octonion values
pub mod value;

pub use algebra::OctonionAlgebra;
pub use value::{BASIS, COMPONENTS, OctonionValue};
