//! Analytic functions of an octonion.
//!
//! Write `a = r + v` with `θ = |v|`. The subalgebra spanned by `1` and `v/θ`
//! is a copy of the complex numbers, so `f(a)` is `f(r + iθ)` mapped back
//! along `v`. Intermediate values carry [`GUARD_DIGITS`] extra digits and the
//! components are rounded to the algebra's context at the end.

use bigdecimal::BigDecimal;
use num_complex::Complex;
use num_traits::{Signed, Zero};
use octalg_core::{
    algebra::{
        Algebra, Exponential, HighPrecision, Hyperbolic, Invertible, Multiplicative, Power,
        Roots, Sinc, Trigonometric,
    },
    error::{AlgebraError, Result},
};
use octalg_decimal::{GUARD_DIGITS, MathContext};
use tracing::trace;

use crate::{
    algebra::OctonionAlgebra,
    complex::{self, ComplexValue},
    value::{COMPONENTS, OctonionValue},
};

/// Real part, unreal part and the magnitude of the unreal part.
struct Split {
    r: BigDecimal,
    v: OctonionValue,
    theta: BigDecimal,
}

impl OctonionAlgebra {
    fn working(&self) -> Result<MathContext> {
        let mc = self.math_context();
        Ok(mc.with_precision(mc.precision() + GUARD_DIGITS)?)
    }

    fn split(&self, w: &MathContext, a: &OctonionValue) -> Result<Split> {
        let v = a.unreal();
        let theta = w.sqrt(&self.norm_squared(&v))?;
        Ok(Split {
            r: a.r().clone(),
            v,
            theta,
        })
    }

    /// `re + factor * v`, rounded.
    fn inflate(&self, re: BigDecimal, factor: &BigDecimal, v: &OctonionValue) -> OctonionValue {
        let mut c = v.components().clone().map(|x| x * factor);
        c[0] = re;
        self.round(c)
    }

    fn via_complex<F>(&self, a: &OctonionValue, f: F) -> Result<OctonionValue>
    where
        F: FnOnce(&MathContext, &ComplexValue) -> octalg_decimal::Result<ComplexValue>,
    {
        let w = self.working()?;
        let Split { r, v, theta } = self.split(&w, a)?;
        let z = f(&w, &Complex::new(r, theta.clone()))?;
        if theta.is_zero() {
            let mut c: [BigDecimal; COMPONENTS] = Default::default();
            c[0] = z.re;
            c[1] = z.im;
            return Ok(self.round(c));
        }
        let factor = w.divide(&z.im, &theta)?;
        Ok(self.inflate(z.re, &factor, &v))
    }

    /// `b = x * y^-1` where `x` and `y` share an axis.
    fn quotient(&self, x: &OctonionValue, y: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let mut inv = self.construct();
        self.invert(y, &mut inv).map_err(|e| match e {
            AlgebraError::DegenerateOperand(_) => AlgebraError::DegenerateOperand("pole"),
            e => e,
        })?;
        self.multiply(x, &inv, b)
    }
}

impl Exponential for OctonionAlgebra {
    fn exp(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let w = self.working()?;
        let Split { r, v, theta } = self.split(&w, a)?;
        let er = w.exp(&r);
        let re = w.multiply(&er, &w.cos(&theta)?);
        let factor = w.multiply(&er, &w.sinc(&theta)?);
        *b = self.inflate(re, &factor, &v);
        Ok(())
    }

    /// Principal logarithm; the logarithm of zero is a domain error.
    fn log(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        *b = self.via_complex(a, complex::ln)?;
        Ok(())
    }
}

impl Trigonometric for OctonionAlgebra {
    fn sin(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let w = self.working()?;
        let Split { r, v, theta } = self.split(&w, a)?;
        let re = w.multiply(&w.sin(&r)?, &w.cosh(&theta));
        let factor = w.multiply(&w.cos(&r)?, &w.sinch(&theta)?);
        *b = self.inflate(re, &factor, &v);
        Ok(())
    }

    fn cos(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let w = self.working()?;
        let Split { r, v, theta } = self.split(&w, a)?;
        let re = w.multiply(&w.cos(&r)?, &w.cosh(&theta));
        let factor = -w.multiply(&w.sin(&r)?, &w.sinch(&theta)?);
        *b = self.inflate(re, &factor, &v);
        Ok(())
    }

    fn tan(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let (mut s, mut c) = (self.construct(), self.construct());
        self.sin(a, &mut s)?;
        self.cos(a, &mut c)?;
        self.quotient(&s, &c, b)
    }
}

impl Hyperbolic for OctonionAlgebra {
    fn sinh(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let w = self.working()?;
        let Split { r, v, theta } = self.split(&w, a)?;
        let re = w.multiply(&w.sinh(&r), &w.cos(&theta)?);
        let factor = w.multiply(&w.cosh(&r), &w.sinc(&theta)?);
        *b = self.inflate(re, &factor, &v);
        Ok(())
    }

    fn cosh(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let w = self.working()?;
        let Split { r, v, theta } = self.split(&w, a)?;
        let re = w.multiply(&w.cosh(&r), &w.cos(&theta)?);
        let factor = w.multiply(&w.sinh(&r), &w.sinc(&theta)?);
        *b = self.inflate(re, &factor, &v);
        Ok(())
    }

    fn tanh(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let (mut s, mut c) = (self.construct(), self.construct());
        self.sinh(a, &mut s)?;
        self.cosh(a, &mut c)?;
        self.quotient(&s, &c, b)
    }
}

impl Sinc for OctonionAlgebra {
    fn sinc(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        if self.is_zero(a) {
            return self.unity(b);
        }
        let mut s = self.construct();
        self.sin(a, &mut s)?;
        self.quotient(&s, a, b)
    }

    fn sinch(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        if self.is_zero(a) {
            return self.unity(b);
        }
        let mut s = self.construct();
        self.sinh(a, &mut s)?;
        self.quotient(&s, a, b)
    }
}

impl Roots for OctonionAlgebra {
    /// Principal square root; `sqrt(-x)` lies on `i`.
    fn sqrt(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        *b = self.via_complex(a, complex::sqrt)?;
        Ok(())
    }

    /// Real cube root for real arguments, principal cube root otherwise.
    fn cbrt(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        *b = self.via_complex(a, complex::cbrt)?;
        Ok(())
    }
}

impl Power for OctonionAlgebra {
    /// `c = exp(b * log(a))`, with `0^0 = 1` and `0^b = 0` when `b.r > 0`.
    /// Any other power of zero fails with [`AlgebraError::DegenerateOperand`].
    fn pow(&self, a: &OctonionValue, b: &OctonionValue, c: &mut OctonionValue) -> Result<()> {
        if self.is_zero(b) {
            return self.unity(c);
        }
        if self.is_zero(a) {
            if !b.r().is_positive() {
                return Err(AlgebraError::DegenerateOperand("non-positive power of zero"));
            }
            self.zero(c);
            return Ok(());
        }
        let wide = OctonionAlgebra::with_context(self.working()?);
        let (mut ln, mut prod, mut out) = (self.construct(), self.construct(), self.construct());
        wide.log(a, &mut ln)?;
        wide.multiply(b, &ln, &mut prod)?;
        wide.exp(&prod, &mut out)?;
        trace!(%a, %b, "pow");
        *c = self.round(out.components().clone());
        Ok(())
    }
}
