use bigdecimal::BigDecimal;
use octalg_core::{
    algebra::{Additive, Scalable},
    algorithm::finite_difference,
    error::Result,
};

use crate::tensor::{TensorAlgebra, TensorMember};

impl<S: Additive + Scalable> TensorAlgebra<S> {
    /// Partial derivative along `axis` of a tensor sampled on a grid with
    /// step `spacing`; the result has the shape of `a`.
    pub fn comma_derivative(
        &self,
        axis: usize,
        spacing: &BigDecimal,
        a: &TensorMember<S::Value>,
        b: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        let mut out = self.like(a, a.rank(), a.dim_count());
        finite_difference(self.scalar(), &a.dims(), axis, spacing, a.storage(), out.storage_mut())?;
        *b = out;
        Ok(())
    }

    /// Covariant derivative. Cartesian coordinates have no connection
    /// coefficients, so this is the comma derivative.
    pub fn semicolon_derivative(
        &self,
        axis: usize,
        spacing: &BigDecimal,
        a: &TensorMember<S::Value>,
        b: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        self.comma_derivative(axis, spacing, a, b)
    }
}
