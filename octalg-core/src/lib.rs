//! Algebra abstraction shared by the octalg crates: capability traits,
//! errors, storage, text notation and generic algorithms.

#![warn(missing_docs)]
#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// capability traits every algebra implements a subset of
pub mod algebra;

/// algebra-parametrized traversal routines
pub mod algorithm;

/// errors shared by every algebra
pub mod error;

/// conversion of values to and from flat primitive arrays
pub mod primitive;

/// row-major index arithmetic
pub mod shape;

/// resizable, linearly addressed containers
pub mod storage;

/// nested bracket notation
pub mod text;

/// homogeneous product algebras
pub mod tuple;

#[cfg(test)]
pub(crate) mod testing;

/// Traits and types most callers need.
pub mod prelude {
    pub use crate::algebra::{
        Additive, Algebra, Conjugate, Exponential, HighPrecision, Hyperbolic, Invertible,
        Multiplicative, Normed, Power, Random, Roots, Scalable, Sinc, Tolerance, Trigonometric,
    };
    pub use crate::error::{AlgebraError, Result};
    pub use crate::primitive::PrimitiveArrays;
    pub use crate::storage::{IndexedStorage, StorageConstruction, ThreadAccess};
}
