//! Complex companion of an octonion.
//!
//! An octonion `r + v` with unreal part `v` of magnitude `θ` behaves like the
//! complex number `r + iθ` under any analytic function; the result is mapped
//! back along `v`.

use bigdecimal::BigDecimal;
use num_complex::Complex;
use num_traits::{Signed, Zero};
use octalg_decimal::{DecimalError, GUARD_DIGITS, MathContext, Result};

/// Complex number with decimal parts.
pub type ComplexValue = Complex<BigDecimal>;

/// `|z|`.
pub fn modulus(mc: &MathContext, z: &ComplexValue) -> Result<BigDecimal> {
    mc.sqrt(&(z.re.square() + z.im.square()))
}

/// Phase of `z` in `(-π, π]`.
pub fn argument(mc: &MathContext, z: &ComplexValue) -> Result<BigDecimal> {
    mc.atan2(&z.im, &z.re)
}

fn rounded(mc: &MathContext, re: BigDecimal, im: BigDecimal) -> ComplexValue {
    Complex::new(mc.round(re), mc.round(im))
}

/// `e^z`.
pub fn exp(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    let m = mc.exp(&z.re);
    Ok(rounded(mc, &m * mc.cos(&z.im)?, &m * mc.sin(&z.im)?))
}

/// Complex sine.
pub fn sin(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    Ok(rounded(
        mc,
        mc.sin(&z.re)? * mc.cosh(&z.im),
        mc.cos(&z.re)? * mc.sinh(&z.im),
    ))
}

/// Complex cosine.
pub fn cos(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    Ok(rounded(
        mc,
        mc.cos(&z.re)? * mc.cosh(&z.im),
        -(mc.sin(&z.re)? * mc.sinh(&z.im)),
    ))
}

/// Complex hyperbolic sine.
pub fn sinh(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    Ok(rounded(
        mc,
        mc.sinh(&z.re) * mc.cos(&z.im)?,
        mc.cosh(&z.re) * mc.sin(&z.im)?,
    ))
}

/// Complex hyperbolic cosine.
pub fn cosh(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    Ok(rounded(
        mc,
        mc.cosh(&z.re) * mc.cos(&z.im)?,
        mc.sinh(&z.re) * mc.sin(&z.im)?,
    ))
}

/// `exp(w * ln(z))`, evaluated with [`GUARD_DIGITS`] extra digits and rounded
/// once. `0^0 = 1`, `0^w = 0` when `re(w) > 0`; any other power of zero is a
/// division by zero.
pub fn pow(mc: &MathContext, z: &ComplexValue, w: &ComplexValue) -> Result<ComplexValue> {
    if w.is_zero() {
        return Ok(Complex::new(BigDecimal::from(1), BigDecimal::zero()));
    }
    if z.is_zero() {
        return if w.re.is_positive() {
            Ok(Complex::zero())
        } else {
            Err(DecimalError::DivisionByZero)
        };
    }
    let wide = mc.with_precision(mc.precision() + GUARD_DIGITS)?;
    let product = w * ln(&wide, z)?;
    let out = exp(&wide, &rounded(&wide, product.re, product.im))?;
    Ok(rounded(mc, out.re, out.im))
}

/// Principal logarithm; `ln(0)` is a domain error.
pub fn ln(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    let re = if z.im.is_zero() {
        mc.ln(&z.re.abs())?
    } else {
        mc.ln(&modulus(mc, z)?)?
    };
    Ok(Complex::new(re, argument(mc, z)?))
}

/// Principal square root.
pub fn sqrt(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    if z.im.is_zero() {
        let root = mc.sqrt(&z.re.abs())?;
        return Ok(if z.re.is_negative() {
            Complex::new(BigDecimal::zero(), root)
        } else {
            Complex::new(root, BigDecimal::zero())
        });
    }
    let m = modulus(mc, z)?;
    let re = mc.sqrt(&(&m + &z.re).half())?;
    let im = mc.sqrt(&(&m - &z.re).half())?;
    Ok(Complex::new(re, if z.im.is_negative() { -im } else { im }))
}

/// Cube root: the real root for real arguments, the principal root otherwise.
pub fn cbrt(mc: &MathContext, z: &ComplexValue) -> Result<ComplexValue> {
    if z.im.is_zero() {
        return Ok(Complex::new(mc.cbrt(&z.re), BigDecimal::zero()));
    }
    let m = mc.cbrt(&modulus(mc, z)?);
    let third = mc.divide(&argument(mc, z)?, &BigDecimal::from(3))?;
    Ok(Complex::new(
        mc.multiply(&m, &mc.cos(&third)?),
        mc.multiply(&m, &mc.sin(&third)?),
    ))
}
