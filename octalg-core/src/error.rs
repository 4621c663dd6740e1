use alloc::{string::String, vec::Vec};

use octalg_decimal::DecimalError;
use thiserror::Error;

/// Failure of an algebra operation.
///
/// Every precondition is checked before an output argument is touched, so an
/// `Err` leaves outputs as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// Operand shapes differ where they must agree.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the left operand.
        left: Vec<usize>,
        /// Shape of the right operand.
        right: Vec<usize>,
    },
    /// An index or axis past the end, or negative.
    #[error("index {index} out of bounds for extent {bound}")]
    IndexOutOfBounds {
        /// The offending index.
        index: isize,
        /// The exclusive upper bound.
        bound: usize,
    },
    /// Any other rejected argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The operation is undefined for this algebra.
    #[error("{operation} is not supported for {type_name}")]
    Unsupported {
        /// Name of the algebra.
        type_name: &'static str,
        /// The refused operation.
        operation: &'static str,
    },
    /// A zero divisor, singular matrix or other value without the required
    /// inverse.
    #[error("degenerate operand: {0}")]
    DegenerateOperand(&'static str),
    /// A primitive array of the wrong length.
    #[error("size mismatch: expected {expected} values, got {actual}")]
    SizeMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Malformed textual notation.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The rejected text.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
    /// An exact construction that would have to round.
    #[error("value cannot be represented exactly: {0}")]
    Inexact(String),
    /// Failure of the underlying decimal arithmetic.
    #[error(transparent)]
    Decimal(#[from] DecimalError),
}

impl AlgebraError {
    /// [`AlgebraError::ShapeMismatch`] of two shapes.
    pub fn shape_mismatch(left: &[usize], right: &[usize]) -> Self {
        AlgebraError::ShapeMismatch {
            left: left.into(),
            right: right.into(),
        }
    }

    /// [`AlgebraError::IndexOutOfBounds`] for an unsigned index.
    pub fn out_of_bounds(index: usize, bound: usize) -> Self {
        AlgebraError::IndexOutOfBounds {
            index: index as isize,
            bound,
        }
    }

    /// [`AlgebraError::InvalidArgument`] with `message`.
    pub fn invalid(message: impl Into<String>) -> Self {
        AlgebraError::InvalidArgument(message.into())
    }

    /// [`AlgebraError::Unsupported`] for `operation` on `type_name`.
    pub fn unsupported(type_name: &'static str, operation: &'static str) -> Self {
        AlgebraError::Unsupported {
            type_name,
            operation,
        }
    }

    /// [`AlgebraError::Parse`] of `input`.
    pub fn parse(input: &str, reason: impl Into<String>) -> Self {
        AlgebraError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Errors caused by bad caller input rather than by the operation itself.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AlgebraError::ShapeMismatch { .. }
                | AlgebraError::IndexOutOfBounds { .. }
                | AlgebraError::InvalidArgument(_)
                | AlgebraError::SizeMismatch { .. }
                | AlgebraError::Parse { .. }
        )
    }
}

/// Result of an algebra operation.
pub type Result<T> = core::result::Result<T, AlgebraError>;
