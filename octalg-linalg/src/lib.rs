//! Vectors and matrices over any algebra, with elimination, spectral norm
//! and matrix power series.
#![warn(missing_docs)]
#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// series lengths and iteration limits
pub mod config;

pub mod matrix;

pub mod rmodule;

mod elimination;
mod series;
mod spectral;

pub use config::{SpectralNormConfig, TaylorTerms};
pub use matrix::{MatrixAlgebra, MatrixMember};
pub use rmodule::{RModuleAlgebra, RModuleMember};
