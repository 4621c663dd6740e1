//! Capability traits of an algebra.
//!
//! An algebra is a stateless operation table for one value type. Values are
//! plain data; every operation reads its inputs by shared reference and writes
//! its result through an exclusive output reference. Results are computed into
//! a temporary before the output is written, and the `*_assign` helpers cover
//! in-place use.

use bigdecimal::BigDecimal;
use num_rational::BigRational;
use octalg_decimal::MathContext;
use rand::Rng;

use crate::{
    algorithm::scale_helper,
    error::{AlgebraError, Result},
};

/// Construction, assignment and equality of a value type.
pub trait Algebra {
    /// The value type this algebra operates on.
    type Value: Clone;

    /// Human-readable name used in error messages.
    fn type_name(&self) -> &'static str;

    /// A new zero-valued instance.
    fn construct(&self) -> Self::Value;

    /// A deep copy of `other`.
    fn construct_copy(&self, other: &Self::Value) -> Self::Value {
        other.clone()
    }

    /// Parses the textual notation of a value.
    fn construct_from_str(&self, s: &str) -> Result<Self::Value> {
        let _ = s;
        Err(AlgebraError::unsupported(
            self.type_name(),
            "construction from a string",
        ))
    }

    /// Copies `from` into `to`.
    fn assign(&self, from: &Self::Value, to: &mut Self::Value) {
        to.clone_from(from);
    }

    /// Value equality.
    fn is_equal(&self, a: &Self::Value, b: &Self::Value) -> bool;

    /// Negation of [`Algebra::is_equal`].
    fn is_not_equal(&self, a: &Self::Value, b: &Self::Value) -> bool {
        !self.is_equal(a, b)
    }

    /// Sets every component of `a` to zero, keeping its shape.
    fn zero(&self, a: &mut Self::Value);

    /// Whether every component of `a` is zero.
    fn is_zero(&self, a: &Self::Value) -> bool;
}

/// Addition, subtraction and negation.
pub trait Additive: Algebra {
    /// `c = a + b`.
    fn add(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()>;

    /// `c = a - b`.
    fn subtract(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()>;

    /// `b = -a`.
    fn negate(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;

    /// `a = a + b`.
    fn add_assign(&self, a: &mut Self::Value, b: &Self::Value) -> Result<()> {
        let lhs = a.clone();
        self.add(&lhs, b, a)
    }

    /// `a = a - b`.
    fn subtract_assign(&self, a: &mut Self::Value, b: &Self::Value) -> Result<()> {
        let lhs = a.clone();
        self.subtract(&lhs, b, a)
    }

    /// `a = -a`.
    fn negate_assign(&self, a: &mut Self::Value) -> Result<()> {
        let src = a.clone();
        self.negate(&src, a)
    }
}

/// Multiplication with a unity.
pub trait Multiplicative: Algebra {
    /// `c = a * b`; operand order is significant.
    fn multiply(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()>;

    /// Sets `a` to the multiplicative identity of its shape.
    fn unity(&self, a: &mut Self::Value) -> Result<()>;

    /// Whether `a` is the multiplicative identity.
    fn is_unity(&self, a: &Self::Value) -> bool;

    /// `b = a^n` by repeated right multiplication.
    fn power(&self, n: i32, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        if n < 0 {
            return Err(AlgebraError::invalid(
                "negative power needs an invertible value",
            ));
        }
        let mut acc = a.clone();
        self.unity(&mut acc)?;
        for _ in 0..n {
            let prev = acc.clone();
            self.multiply(&prev, a, &mut acc)?;
        }
        self.assign(&acc, b);
        Ok(())
    }

    /// `a = a * b`.
    fn multiply_assign(&self, a: &mut Self::Value, b: &Self::Value) -> Result<()> {
        let lhs = a.clone();
        self.multiply(&lhs, b, a)
    }
}

/// Multiplicative inverses and division.
pub trait Invertible: Multiplicative {
    /// `b = a^-1`; a zero operand is a [`AlgebraError::DegenerateOperand`].
    fn invert(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;

    /// `c = a * b^-1`.
    fn divide(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()> {
        let mut inv = b.clone();
        self.invert(b, &mut inv)?;
        self.multiply(a, &inv, c)
    }
}

/// Conjugation.
pub trait Conjugate: Algebra {
    /// `b = conj(a)`.
    fn conjugate(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
}

/// Algebras whose results are rounded under a [`MathContext`].
pub trait HighPrecision {
    /// Precision and rounding of this algebra.
    fn math_context(&self) -> &MathContext;
}

/// A real magnitude.
pub trait Normed: Algebra {
    /// `out = |a|`.
    fn norm(&self, a: &Self::Value, out: &mut BigDecimal) -> Result<()>;
}

/// Approximate comparison.
pub trait Tolerance: Algebra {
    /// Whether `a` and `b` differ by at most `tol` in every component.
    fn within(&self, tol: &BigDecimal, a: &Self::Value, b: &Self::Value) -> Result<bool>;
}

/// Multiplication by a scalar from the left.
pub trait Scalable: Algebra {
    /// The element type a value can be scaled by.
    type Scalar;

    /// `b = factor * a`.
    fn scale(&self, factor: &Self::Scalar, a: &Self::Value, b: &mut Self::Value) -> Result<()>;

    /// `b = factor * a` for a real decimal factor.
    fn scale_by_high_prec(
        &self,
        factor: &BigDecimal,
        a: &Self::Value,
        b: &mut Self::Value,
    ) -> Result<()>;

    /// `b = factor * a` for an exact rational factor.
    fn scale_by_rational(
        &self,
        factor: &BigRational,
        a: &Self::Value,
        b: &mut Self::Value,
    ) -> Result<()>;

    /// `b = factor * a`; non-finite factors are rejected.
    fn scale_by_double(&self, factor: f64, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        let factor = BigDecimal::try_from(factor)
            .map_err(|_| AlgebraError::invalid("scale factor must be finite"))?;
        self.scale_by_high_prec(&factor, a, b)
    }

    /// `b = a * 2^times`.
    fn scale_by_two(&self, times: u32, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        let two = BigDecimal::from(2);
        scale_helper::repeat(times, a, b, |x, y| self.scale_by_high_prec(&two, x, y))
    }

    /// `b = a * 2^-times`.
    fn scale_by_one_half(&self, times: u32, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        let half = BigDecimal::new(5.into(), 1);
        scale_helper::repeat(times, a, b, |x, y| self.scale_by_high_prec(&half, x, y))
    }
}

/// Exponential and principal logarithm.
pub trait Exponential: Algebra {
    /// `b = exp(a)`.
    fn exp(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
    /// `b = log(a)`.
    fn log(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
}

/// Circular functions.
pub trait Trigonometric: Algebra {
    /// `b = sin(a)`.
    fn sin(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
    /// `b = cos(a)`.
    fn cos(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
    /// `b = tan(a)`.
    fn tan(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
}

/// Hyperbolic functions.
pub trait Hyperbolic: Algebra {
    /// `b = sinh(a)`.
    fn sinh(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
    /// `b = cosh(a)`.
    fn cosh(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
    /// `b = tanh(a)`.
    fn tanh(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
}

/// `sin(x)/x` and `sinh(x)/x`, continuous at zero.
pub trait Sinc: Algebra {
    /// `b = sin(a)/a`, one at zero.
    fn sinc(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
    /// `b = sinh(a)/a`, one at zero.
    fn sinch(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
}

/// Principal square and cube roots.
pub trait Roots: Algebra {
    /// `b = sqrt(a)`.
    fn sqrt(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
    /// `b = cbrt(a)`.
    fn cbrt(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()>;
}

/// Powers with an exponent of the same type.
pub trait Power: Algebra {
    /// `c = a^b`.
    fn pow(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()>;
}

/// Random values from a caller-supplied generator.
pub trait Random: Algebra {
    /// Fills every component of `a` uniformly from `[0, 1)`.
    fn random_using<R: Rng + ?Sized>(&self, rng: &mut R, a: &mut Self::Value);
}
