//! Exact integer algebra for exercising generic code.

use bigdecimal::BigDecimal;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::{
    algebra::{Additive, Algebra, Multiplicative, Scalable, Tolerance},
    error::{AlgebraError, Result},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct IntAlgebra;

impl Algebra for IntAlgebra {
    type Value = i64;

    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn construct(&self) -> i64 {
        0
    }

    fn is_equal(&self, a: &i64, b: &i64) -> bool {
        a == b
    }

    fn zero(&self, a: &mut i64) {
        *a = 0;
    }

    fn is_zero(&self, a: &i64) -> bool {
        *a == 0
    }
}

impl Additive for IntAlgebra {
    fn add(&self, a: &i64, b: &i64, c: &mut i64) -> Result<()> {
        *c = a + b;
        Ok(())
    }

    fn subtract(&self, a: &i64, b: &i64, c: &mut i64) -> Result<()> {
        *c = a - b;
        Ok(())
    }

    fn negate(&self, a: &i64, b: &mut i64) -> Result<()> {
        *b = -a;
        Ok(())
    }
}

impl Multiplicative for IntAlgebra {
    fn multiply(&self, a: &i64, b: &i64, c: &mut i64) -> Result<()> {
        *c = a * b;
        Ok(())
    }

    fn unity(&self, a: &mut i64) -> Result<()> {
        *a = 1;
        Ok(())
    }

    fn is_unity(&self, a: &i64) -> bool {
        *a == 1
    }
}

impl Tolerance for IntAlgebra {
    fn within(&self, tol: &BigDecimal, a: &i64, b: &i64) -> Result<bool> {
        Ok(BigDecimal::from((a - b).abs()) <= *tol)
    }
}

impl Scalable for IntAlgebra {
    type Scalar = i64;

    fn scale(&self, factor: &i64, a: &i64, b: &mut i64) -> Result<()> {
        *b = factor * a;
        Ok(())
    }

    fn scale_by_high_prec(&self, factor: &BigDecimal, a: &i64, b: &mut i64) -> Result<()> {
        let f = Some(factor)
            .filter(|f| f.is_integer())
            .and_then(|f| f.to_i64())
            .ok_or_else(|| AlgebraError::Inexact(alloc::format!("{factor}")))?;
        *b = f * a;
        Ok(())
    }

    fn scale_by_rational(&self, factor: &BigRational, a: &i64, b: &mut i64) -> Result<()> {
        let scaled = factor * BigRational::from_integer((*a).into());
        if !scaled.is_integer() {
            return Err(AlgebraError::Inexact(alloc::format!("{scaled}")));
        }
        *b = scaled
            .to_integer()
            .to_i64()
            .ok_or_else(|| AlgebraError::invalid("overflow"))?;
        Ok(())
    }
}
