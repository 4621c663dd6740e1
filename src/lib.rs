//! High-precision octonion algebra with vector, matrix and Cartesian tensor
//! layers.
//!
//! Every structure is driven through an algebra object: values are plain
//! data, and the algebra constructs them and runs every operation, writing
//! results through an output argument.
//!
//! ```
//! use octalg::prelude::*;
//!
//! let alg = OctonionAlgebra::new();
//! let i: OctonionValue = "{0,1}".parse()?;
//! let j: OctonionValue = "{0,0,1}".parse()?;
//! let mut k = alg.construct();
//! alg.multiply(&i, &j, &mut k)?;
//! let expected: OctonionValue = "{0,0,0,1}".parse()?;
//! assert_eq!(k, expected);
//! # Ok::<(), octalg::AlgebraError>(())
//! ```

#![warn(missing_docs)]
#![no_std]

pub use octalg_core::{
    algebra, algorithm,
    error::{AlgebraError, Result},
    primitive, shape, storage, text,
    tuple::TupleAlgebra,
};
pub use octalg_decimal::{
    BigDecimal, DEFAULT_PRECISION, DecimalError, GUARD_DIGITS, MathContext, RoundingMode,
};
pub use octalg_linalg::{
    MatrixAlgebra, MatrixMember, RModuleAlgebra, RModuleMember, SpectralNormConfig, TaylorTerms,
};
pub use octalg_octonion::{BASIS, COMPONENTS, OctonionAlgebra, OctonionValue, complex};
pub use octalg_tensor::{TensorAlgebra, TensorMember};

/// Vectors of octonions.
pub type OctonionVectorAlgebra = RModuleAlgebra<OctonionAlgebra>;

/// Matrices of octonions.
pub type OctonionMatrixAlgebra = MatrixAlgebra<OctonionAlgebra>;

/// Cartesian tensors of octonions.
pub type OctonionTensorAlgebra = TensorAlgebra<OctonionAlgebra>;

/// Traits and types most callers need.
pub mod prelude {
    pub use octalg_core::prelude::*;

    pub use crate::{
        MathContext, MatrixAlgebra, MatrixMember, OctonionAlgebra, OctonionMatrixAlgebra,
        OctonionTensorAlgebra, OctonionValue, OctonionVectorAlgebra, RModuleAlgebra,
        RModuleMember, TensorAlgebra, TensorMember,
    };
}
