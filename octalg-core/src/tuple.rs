use bigdecimal::BigDecimal;
use num_rational::BigRational;

use crate::{
    algebra::{Additive, Algebra, Scalable, Tolerance},
    error::Result,
};

/// Product of `N` copies of a scalar algebra, operated on componentwise.
#[derive(Debug, Clone, Default)]
pub struct TupleAlgebra<S, const N: usize> {
    scalar: S,
}

impl<S, const N: usize> TupleAlgebra<S, N> {
    /// Tuples over `scalar`.
    pub fn new(scalar: S) -> Self {
        TupleAlgebra { scalar }
    }

    /// The component algebra.
    pub fn scalar(&self) -> &S {
        &self.scalar
    }
}

impl<S: Algebra, const N: usize> TupleAlgebra<S, N> {
    fn each<F>(&self, a: &[S::Value; N], b: &[S::Value; N], c: &mut [S::Value; N], mut op: F) -> Result<()>
    where
        F: FnMut(&S::Value, &S::Value, &mut S::Value) -> Result<()>,
    {
        let mut out = c.clone();
        for k in 0..N {
            op(&a[k], &b[k], &mut out[k])?;
        }
        *c = out;
        Ok(())
    }

    fn each_unary<F>(&self, a: &[S::Value; N], b: &mut [S::Value; N], mut op: F) -> Result<()>
    where
        F: FnMut(&S::Value, &mut S::Value) -> Result<()>,
    {
        let mut out = b.clone();
        for k in 0..N {
            op(&a[k], &mut out[k])?;
        }
        *b = out;
        Ok(())
    }
}

impl<S: Algebra, const N: usize> Algebra for TupleAlgebra<S, N> {
    type Value = [S::Value; N];

    fn type_name(&self) -> &'static str {
        "tuple"
    }

    fn construct(&self) -> Self::Value {
        core::array::from_fn(|_| self.scalar.construct())
    }

    fn is_equal(&self, a: &Self::Value, b: &Self::Value) -> bool {
        a.iter().zip(b).all(|(x, y)| self.scalar.is_equal(x, y))
    }

    fn zero(&self, a: &mut Self::Value) {
        for x in a.iter_mut() {
            self.scalar.zero(x);
        }
    }

    fn is_zero(&self, a: &Self::Value) -> bool {
        a.iter().all(|x| self.scalar.is_zero(x))
    }
}

impl<S: Additive, const N: usize> Additive for TupleAlgebra<S, N> {
    fn add(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()> {
        self.each(a, b, c, |x, y, z| self.scalar.add(x, y, z))
    }

    fn subtract(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()> {
        self.each(a, b, c, |x, y, z| self.scalar.subtract(x, y, z))
    }

    fn negate(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.each_unary(a, b, |x, y| self.scalar.negate(x, y))
    }
}

impl<S: Tolerance, const N: usize> Tolerance for TupleAlgebra<S, N> {
    fn within(&self, tol: &BigDecimal, a: &Self::Value, b: &Self::Value) -> Result<bool> {
        for (x, y) in a.iter().zip(b) {
            if !self.scalar.within(tol, x, y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<S: Scalable, const N: usize> Scalable for TupleAlgebra<S, N> {
    type Scalar = S::Scalar;

    fn scale(&self, factor: &Self::Scalar, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.each_unary(a, b, |x, y| self.scalar.scale(factor, x, y))
    }

    fn scale_by_high_prec(&self, factor: &BigDecimal, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.each_unary(a, b, |x, y| self.scalar.scale_by_high_prec(factor, x, y))
    }

    fn scale_by_rational(&self, factor: &BigRational, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.each_unary(a, b, |x, y| self.scalar.scale_by_rational(factor, x, y))
    }
}
