//! Cartesian tensors over any algebra.
#![warn(missing_docs)]
#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod tensor;

/// comma and semicolon derivatives
mod derivative;

pub use tensor::{TensorAlgebra, TensorMember};
