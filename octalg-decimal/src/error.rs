use thiserror::Error;

/// Failure of a high-precision real operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// A zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// An argument outside the domain of a real function.
    #[error("{function} is undefined for argument {argument}")]
    Domain {
        /// Name of the function.
        function: &'static str,
        /// The rejected argument, as text.
        argument: alloc::string::String,
    },
    /// A [`MathContext`](crate::MathContext) with zero digits.
    #[error("precision must be at least one digit")]
    InvalidPrecision,
}

impl DecimalError {
    pub(crate) fn domain(function: &'static str, argument: &bigdecimal::BigDecimal) -> Self {
        use alloc::string::ToString;
        DecimalError::Domain {
            function,
            argument: argument.to_string(),
        }
    }
}

/// Result of a decimal operation.
pub type Result<T> = core::result::Result<T, DecimalError>;
