use core::num::NonZeroU64;

use bigdecimal::{BigDecimal, Context, RoundingMode};
use num_traits::{Signed, Zero};
use num_bigint::BigInt;

use crate::error::{DecimalError, Result};

/// Extra digits carried by intermediate results of series evaluation.
pub const GUARD_DIGITS: u64 = 10;

/// Default number of significant digits.
pub const DEFAULT_PRECISION: u64 = 50;

/// Precision and rounding applied to every inexact high-precision operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathContext {
    precision: NonZeroU64,
    rounding: RoundingMode,
}

impl Default for MathContext {
    fn default() -> Self {
        MathContext {
            precision: NonZeroU64::new(DEFAULT_PRECISION).unwrap_or(NonZeroU64::MIN),
            rounding: RoundingMode::HalfEven,
        }
    }
}

impl MathContext {
    /// Fails with [`DecimalError::InvalidPrecision`] for zero digits.
    pub fn new(precision: u64, rounding: RoundingMode) -> Result<Self> {
        let precision = NonZeroU64::new(precision).ok_or(DecimalError::InvalidPrecision)?;
        Ok(MathContext {
            precision,
            rounding,
        })
    }

    /// This context with another precision.
    pub fn with_precision(&self, precision: u64) -> Result<Self> {
        Self::new(precision, self.rounding)
    }

    /// This context with another rounding mode.
    pub fn with_rounding_mode(&self, rounding: RoundingMode) -> Self {
        MathContext {
            rounding,
            ..*self
        }
    }

    /// Significant digits kept by rounded results.
    pub fn precision(&self) -> u64 {
        self.precision.get()
    }

    /// Rounding applied to inexact results.
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding
    }

    /// The equivalent `bigdecimal` context.
    pub fn context(&self) -> Context {
        Context::new(self.precision, self.rounding)
    }

    /// Context with guard digits, used for intermediate results.
    pub(crate) fn working(&self) -> MathContext {
        self.widened(GUARD_DIGITS)
    }

    pub(crate) fn widened(&self, extra: u64) -> MathContext {
        MathContext {
            precision: self.precision.saturating_add(extra),
            rounding: self.rounding,
        }
    }

    /// Rounds `x` to this context's precision.
    pub fn round(&self, x: BigDecimal) -> BigDecimal {
        if x.is_zero() {
            return BigDecimal::zero();
        }
        x.with_precision_round(self.precision, self.rounding)
    }

    /// [`MathContext::round`] of a borrowed value.
    pub fn round_ref(&self, x: &BigDecimal) -> BigDecimal {
        self.round(x.clone())
    }

    /// `10^-(precision + 2)` scaled to the magnitude of `reference`.
    pub fn tolerance(&self, reference: &BigDecimal) -> BigDecimal {
        let magnitude = if reference.is_zero() {
            0
        } else {
            reference.order_of_magnitude()
        };
        let exponent = self.precision() as i64 + 2 - magnitude;
        BigDecimal::new(BigInt::from(1), exponent)
    }

    /// Rounded `a * b`.
    pub fn multiply(&self, a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
        self.round(a * b)
    }

    /// Rounded `a / b`.
    pub fn divide(&self, a: &BigDecimal, b: &BigDecimal) -> Result<BigDecimal> {
        if b.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        let w = self.working().context();
        Ok(self.round(a * w.invert(b)))
    }

    /// Rounded `1 / x`.
    pub fn reciprocal(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if x.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(self.context().invert(x))
    }

    pub(crate) fn divide_int(&self, x: &BigDecimal, n: u64) -> BigDecimal {
        let inv = self.context().invert(&BigDecimal::from(n));
        self.round(x * inv)
    }

    /// Square root; negative arguments are a domain error.
    pub fn sqrt(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if x.is_negative() {
            return Err(DecimalError::domain("sqrt", x));
        }
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }
        x.sqrt_with_context(&self.context())
            .ok_or_else(|| DecimalError::domain("sqrt", x))
    }

    /// Real cube root, defined for every argument.
    pub fn cbrt(&self, x: &BigDecimal) -> BigDecimal {
        if x.is_zero() {
            return BigDecimal::zero();
        }
        let root = x.abs().cbrt_with_context(&self.context());
        if x.is_negative() { -root } else { root }
    }

    /// Integer power; a negative exponent of zero is a division by zero.
    pub fn powi(&self, x: &BigDecimal, n: i64) -> Result<BigDecimal> {
        if n < 0 && x.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(self.round(x.powi_with_context(n, &self.working().context())))
    }

    /// Whether `a` and `b` agree in all but the last five significant
    /// digits, relative to the larger magnitude and never finer than unit
    /// scale.
    pub fn approx_eq(&self, a: &BigDecimal, b: &BigDecimal) -> bool {
        let diff = (a - b).abs();
        let larger = if a.abs() > b.abs() { a.abs() } else { b.abs() };
        let magnitude = if larger.is_zero() {
            0
        } else {
            larger.order_of_magnitude().max(0)
        };
        diff <= BigDecimal::new(BigInt::from(1), self.precision() as i64 - 5 - magnitude)
    }
}

/// Series term small enough to stop summing relative to `sum`.
pub(crate) fn negligible(term: &BigDecimal, sum: &BigDecimal, precision: u64) -> bool {
    if term.is_zero() {
        return true;
    }
    if sum.is_zero() {
        return false;
    }
    term.order_of_magnitude() < sum.order_of_magnitude() - precision as i64 - 1
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn zero_precision_rejected() {
        assert_eq!(
            MathContext::new(0, RoundingMode::HalfEven),
            Err(DecimalError::InvalidPrecision)
        );
    }

    #[test]
    fn default_context() {
        let mc = MathContext::default();
        assert_eq!(mc.precision(), DEFAULT_PRECISION);
        assert_eq!(mc.rounding_mode(), RoundingMode::HalfEven);
    }

    #[test]
    fn divide_rounds_to_precision() -> anyhow::Result<()> {
        let mc = MathContext::new(5, RoundingMode::HalfEven)?;
        let q = mc.divide(&BigDecimal::from(2), &BigDecimal::from(3))?;
        assert_eq!(q, dec("0.66667"));
        assert_eq!(
            mc.divide(&BigDecimal::from(1), &BigDecimal::zero()),
            Err(DecimalError::DivisionByZero)
        );
        Ok(())
    }

    #[test]
    fn roots() -> anyhow::Result<()> {
        let mc = MathContext::default();
        assert_eq!(mc.sqrt(&BigDecimal::from(144))?, BigDecimal::from(12));
        assert!(mc.sqrt(&BigDecimal::from(-1)).is_err());
        assert!(mc.approx_eq(&mc.cbrt(&BigDecimal::from(-27)), &BigDecimal::from(-3)));
        let two = mc.sqrt(&BigDecimal::from(2))?;
        assert!(mc.approx_eq(&(&two * &two), &BigDecimal::from(2)));
        Ok(())
    }

    #[test]
    fn powi_negative_exponent() -> anyhow::Result<()> {
        let mc = MathContext::default();
        assert_eq!(mc.powi(&BigDecimal::from(2), -2)?, dec("0.25"));
        assert_eq!(
            mc.powi(&BigDecimal::zero(), -1),
            Err(DecimalError::DivisionByZero)
        );
        Ok(())
    }
}
