use bigdecimal::{BigDecimal, One, Signed, Zero};
use tracing::trace;

use crate::{
    context::{GUARD_DIGITS, MathContext, negligible},
    error::Result,
};

impl MathContext {
    /// Archimedes' constant by Machin's formula.
    pub fn pi(&self) -> BigDecimal {
        let w = self.working();
        let a = w.atan_inverse(5);
        let b = w.atan_inverse(239);
        self.round(a * BigDecimal::from(16) - b * BigDecimal::from(4))
    }

    /// `atan(1 / n)` for an integer `n > 1`.
    fn atan_inverse(&self, n: u64) -> BigDecimal {
        let n2 = n * n;
        let mut power = self.divide_int(&BigDecimal::one(), n);
        let mut sum = power.clone();
        let mut k = 1u64;
        let mut negative = true;
        loop {
            power = self.divide_int(&power, n2);
            k += 2;
            let term = self.divide_int(&power, k);
            if negligible(&term, &sum, self.precision()) {
                break;
            }
            if negative {
                sum -= term;
            } else {
                sum += term;
            }
            negative = !negative;
        }
        sum
    }

    /// Reduces `x` modulo `2*pi` into `[-pi, pi]`.
    fn reduce_angle(&self, x: &BigDecimal) -> Result<BigDecimal> {
        let magnitude = x.order_of_magnitude().max(0) as u64;
        let w = self.widened(GUARD_DIGITS + magnitude);
        let two_pi = w.pi().double();
        if x.abs() <= two_pi.half() {
            return Ok(x.clone());
        }
        let turns = w.divide(x, &two_pi)?.round(0);
        Ok(self.round(x - turns * two_pi))
    }

    /// Sine of `x` radians.
    pub fn sin(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }
        let w = self.working();
        let r = w.reduce_angle(x)?;
        let r2 = w.multiply(&r, &r);
        let mut term = r.clone();
        let mut sum = r;
        let mut k = 1u64;
        loop {
            term = -w.divide_int(&w.multiply(&term, &r2), (k + 1) * (k + 2));
            k += 2;
            if negligible(&term, &sum, w.precision()) {
                break;
            }
            sum += &term;
        }
        trace!(terms = k / 2, "sin series");
        Ok(self.round(sum))
    }

    /// Cosine of `x` radians.
    pub fn cos(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::one());
        }
        let w = self.working();
        let r = w.reduce_angle(x)?;
        let r2 = w.multiply(&r, &r);
        let mut term = BigDecimal::one();
        let mut sum = BigDecimal::one();
        let mut k = 0u64;
        loop {
            term = -w.divide_int(&w.multiply(&term, &r2), (k + 1) * (k + 2));
            k += 2;
            if negligible(&term, &sum, w.precision()) {
                break;
            }
            sum += &term;
        }
        Ok(self.round(sum))
    }

    /// Tangent; a pole is a division by zero.
    pub fn tan(&self, x: &BigDecimal) -> Result<BigDecimal> {
        let w = self.working();
        let t = w.divide(&w.sin(x)?, &w.cos(x)?)?;
        Ok(self.round(t))
    }

    /// `sin(x) / x`, equal to one at zero.
    pub fn sinc(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::one());
        }
        let w = self.working();
        let s = w.divide(&w.sin(x)?, x)?;
        Ok(self.round(s))
    }

    /// Arctangent in `(-π/2, π/2)`.
    pub fn atan(&self, x: &BigDecimal) -> Result<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }
        let w = self.working();
        let one = BigDecimal::one();
        if x.abs() > one {
            // atan(x) = sign(x) * pi/2 - atan(1/x)
            let half_pi = w.pi().half();
            let inner = w.atan(&w.reciprocal(x)?)?;
            let outer = if x.is_negative() { -half_pi } else { half_pi };
            return Ok(self.round(outer - inner));
        }
        // three argument halvings: atan(x) = 2 atan(x / (1 + sqrt(1 + x^2)))
        let mut y = x.clone();
        for _ in 0..3 {
            let root = w.sqrt(&(&one + w.multiply(&y, &y)))?;
            y = w.divide(&y, &(&one + root))?;
        }
        let y2 = w.multiply(&y, &y);
        let mut power = y.clone();
        let mut sum = y;
        let mut k = 1u64;
        let mut negative = true;
        loop {
            power = w.multiply(&power, &y2);
            k += 2;
            let term = w.divide_int(&power, k);
            if negligible(&term, &sum, w.precision()) {
                break;
            }
            if negative {
                sum -= term;
            } else {
                sum += term;
            }
            negative = !negative;
        }
        Ok(self.round(sum * BigDecimal::from(8)))
    }

    /// Four-quadrant arctangent of `y / x`; `atan2(0, 0)` is zero.
    pub fn atan2(&self, y: &BigDecimal, x: &BigDecimal) -> Result<BigDecimal> {
        let w = self.working();
        if x.is_zero() {
            let half_pi = w.pi().half();
            return Ok(if y.is_positive() {
                self.round(half_pi)
            } else if y.is_negative() {
                self.round(-half_pi)
            } else {
                BigDecimal::zero()
            });
        }
        let base = w.atan(&w.divide(y, x)?)?;
        if x.is_positive() {
            return Ok(self.round(base));
        }
        let pi = w.pi();
        Ok(if y.is_negative() {
            self.round(base - pi)
        } else {
            self.round(base + pi)
        })
    }
}
