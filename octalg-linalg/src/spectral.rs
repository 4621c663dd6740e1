use alloc::vec::Vec;

use bigdecimal::BigDecimal;
use num_traits::Zero;
use octalg_core::{
    algebra::{Additive, Conjugate, HighPrecision, Multiplicative, Normed, Scalable},
    error::Result,
};
use tracing::debug;

use crate::matrix::{MatrixAlgebra, MatrixMember};

impl<S> MatrixAlgebra<S>
where
    S: Additive + Multiplicative + Conjugate + Normed + Scalable + HighPrecision,
{
    fn vector_norm(&self, x: &[S::Value]) -> Result<BigDecimal> {
        let mut sum = BigDecimal::zero();
        let mut n = BigDecimal::zero();
        for v in x {
            self.scalar().norm(v, &mut n)?;
            sum += n.square();
        }
        Ok(self.scalar().math_context().sqrt(&sum)?)
    }

    fn normalize(&self, x: &[S::Value], norm: &BigDecimal) -> Result<Vec<S::Value>> {
        let factor = self.scalar().math_context().reciprocal(norm)?;
        x.iter()
            .map(|v| -> Result<S::Value> {
                let mut y = self.scalar().construct();
                self.scalar().scale_by_high_prec(&factor, v, &mut y)?;
                Ok(y)
            })
            .collect()
    }

    /// `A^H y`, entry `j` being `Σ_i conj(a[i][j]) * y[i]`.
    fn apply_adjoint(&self, a: &MatrixMember<S::Value>, y: &[S::Value]) -> Result<Vec<S::Value>> {
        let scalar = self.scalar();
        let (mut conj, mut prod) = (scalar.construct(), scalar.construct());
        let mut out = Vec::with_capacity(a.cols());
        for c in 0..a.cols() {
            let mut sum = scalar.construct();
            for (r, v) in y.iter().enumerate() {
                scalar.conjugate(a.get(r, c)?, &mut conj)?;
                scalar.multiply(&conj, v, &mut prod)?;
                scalar.add_assign(&mut sum, &prod)?;
            }
            out.push(sum);
        }
        Ok(out)
    }

    /// Largest singular value by power iteration on `x -> A^H (A x)`,
    /// started from the column of largest norm.
    pub fn spectral_norm(&self, a: &MatrixMember<S::Value>, out: &mut BigDecimal) -> Result<()> {
        let mc = *self.scalar().math_context();
        let mut start: Option<(Vec<S::Value>, BigDecimal)> = None;
        for c in 0..a.cols() {
            let column = (0..a.rows())
                .map(|r| a.get(r, c).cloned())
                .collect::<Result<Vec<_>>>()?;
            let n = self.vector_norm(&column)?;
            if !n.is_zero() && start.as_ref().is_none_or(|(_, best)| n > *best) {
                start = Some((column, n));
            }
        }
        let Some((column, n)) = start else {
            *out = BigDecimal::zero();
            return Ok(());
        };

        let mut x = self.normalize(&column, &n)?;
        let mut estimate = BigDecimal::zero();
        let mut iterations = 0;
        while iterations < self.spectral_norm_config().max_iterations {
            iterations += 1;
            let z = self.apply_adjoint(a, &self.apply(a, &x)?)?;
            let zn = self.vector_norm(&z)?;
            if zn.is_zero() {
                break;
            }
            let sigma = mc.sqrt(&zn)?;
            let converged = (&sigma - &estimate).abs() <= mc.tolerance(&sigma);
            estimate = sigma;
            if converged {
                break;
            }
            x = self.normalize(&z, &zn)?;
        }
        debug!(iterations, %estimate, "spectral norm");
        *out = estimate;
        Ok(())
    }
}

impl<S> Normed for MatrixAlgebra<S>
where
    S: Additive + Multiplicative + Conjugate + Normed + Scalable + HighPrecision,
{
    /// Spectral norm.
    fn norm(&self, a: &Self::Value, out: &mut BigDecimal) -> Result<()> {
        self.spectral_norm(a, out)
    }
}
