use bigdecimal::{BigDecimal, One, Signed, ToPrimitive, Zero};
use tracing::trace;

use crate::{
    context::{GUARD_DIGITS, MathContext, negligible},
    error::{DecimalError, Result},
};

impl MathContext {
    /// `e^x`.
    pub fn exp(&self, x: &BigDecimal) -> BigDecimal {
        if x.is_zero() {
            return BigDecimal::one();
        }
        self.round(x.exp_with_context(&self.working().context()))
    }

    /// Euler's number.
    pub fn e(&self) -> BigDecimal {
        self.exp(&BigDecimal::one())
    }

    /// Natural logarithm; non-positive arguments are a domain error.
    pub fn ln(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if !x.is_positive() {
            return Err(DecimalError::domain("ln", x));
        }
        if x.is_one() {
            return Ok(BigDecimal::zero());
        }
        let w = self.widened(2 * GUARD_DIGITS);
        // x = m * 10^e with m in [1, 10)
        let e = x.order_of_magnitude();
        let (digits, scale) = x.as_bigint_and_exponent();
        let m = BigDecimal::new(digits, scale + e);
        let mut ln = w.ln_near_one(&m)?;
        if e != 0 {
            let ln10 = w.ln_near_one(&BigDecimal::from(10))?;
            ln += ln10 * BigDecimal::from(e);
        }
        Ok(self.round(ln))
    }

    /// Logarithm of a value in `(0, 10]` by square-root reduction and the atanh series.
    fn ln_near_one(&self, m: &BigDecimal) -> Result<BigDecimal> {
        let tenth = BigDecimal::new(1.into(), 1);
        let one = BigDecimal::one();
        let mut y = m.clone();
        let mut halvings = 0u32;
        while (&y - &one).abs() >= tenth {
            y = self.sqrt(&y)?;
            halvings += 1;
        }
        let z = self.divide(&(&y - &one), &(&y + &one))?;
        let z2 = self.multiply(&z, &z);
        let mut power = z.clone();
        let mut sum = z;
        let mut k = 1u64;
        loop {
            power = self.multiply(&power, &z2);
            k += 2;
            let term = self.divide_int(&power, k);
            if negligible(&term, &sum, self.precision()) {
                break;
            }
            sum += term;
        }
        trace!(halvings, terms = k / 2, "ln series");
        let factor = BigDecimal::from(2u64 << halvings);
        Ok(self.round(sum * factor))
    }

    /// Hyperbolic sine.
    pub fn sinh(&self, x: &BigDecimal) -> BigDecimal {
        if x.is_zero() {
            return BigDecimal::zero();
        }
        let w = self.working();
        if x.abs() < BigDecimal::one() {
            let x2 = w.multiply(x, x);
            let mut term = x.clone();
            let mut sum = x.clone();
            let mut k = 1u64;
            loop {
                term = w.divide_int(&w.multiply(&term, &x2), (k + 1) * (k + 2));
                k += 2;
                if negligible(&term, &sum, w.precision()) {
                    break;
                }
                sum += &term;
            }
            return self.round(sum);
        }
        let ep = w.exp(x);
        let en = w.exp(&-x);
        self.round((ep - en).half())
    }

    /// Hyperbolic cosine.
    pub fn cosh(&self, x: &BigDecimal) -> BigDecimal {
        let w = self.working();
        let ep = w.exp(x);
        let en = w.exp(&-x);
        self.round((ep + en).half())
    }

    /// Hyperbolic tangent.
    pub fn tanh(&self, x: &BigDecimal) -> Result<BigDecimal> {
        let w = self.working();
        let t = w.divide(&w.sinh(x), &w.cosh(x))?;
        Ok(self.round(t))
    }

    /// `sinh(x) / x`, equal to one at zero.
    pub fn sinch(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::one());
        }
        let w = self.working();
        let s = w.divide(&w.sinh(x), x)?;
        Ok(self.round(s))
    }

    /// Real power `x^y`.
    ///
    /// A negative base is only accepted with an integral exponent.
    pub fn pow(&self, x: &BigDecimal, y: &BigDecimal) -> Result<BigDecimal> {
        if y.is_zero() {
            return Ok(BigDecimal::one());
        }
        if x.is_zero() {
            return if y.is_positive() {
                Ok(BigDecimal::zero())
            } else {
                Err(DecimalError::DivisionByZero)
            };
        }
        if y.is_integer() {
            if let Some(n) = y.to_i64() {
                return self.powi(x, n);
            }
        }
        if x.is_negative() {
            return Err(DecimalError::domain("pow", x));
        }
        let w = self.widened(2 * GUARD_DIGITS);
        let ln = w.ln(x)?;
        Ok(self.round(w.exp(&w.multiply(y, &ln))))
    }
}
