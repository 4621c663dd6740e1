//! Determinant and inverse by elimination.
//!
//! Rows are swapped only when the diagonal entry is zero, so the pivot
//! sequence, and with it the determinant, varies continuously with the
//! entries. Row operations only multiply by pivot inverses from the left,
//! so the results are exact for associative scalars and well defined for
//! every scalar algebra.

use alloc::vec::Vec;

use octalg_core::{
    algebra::{Additive, Invertible},
    error::{AlgebraError, Result},
};
use tracing::debug;

use crate::matrix::{MatrixAlgebra, MatrixMember};

type Rows<V> = Vec<Vec<V>>;

impl<S: Additive + Invertible> MatrixAlgebra<S> {
    /// First row in `from..` with a nonzero entry in `col`, or `None` when
    /// the whole column below `from` is zero.
    fn pivot_row(&self, rows: &Rows<S::Value>, col: usize, from: usize) -> Option<usize> {
        (from..rows.len()).find(|&r| !self.scalar().is_zero(&rows[r][col]))
    }

    /// `target[j] -= factor * source[j]` for `j` in `from..`.
    fn eliminate(
        &self,
        target: &mut [S::Value],
        factor: &S::Value,
        source: &[S::Value],
        from: usize,
    ) -> Result<()> {
        let scalar = self.scalar();
        let mut prod = scalar.construct();
        for (t, s) in target.iter_mut().zip(source).skip(from) {
            scalar.multiply(factor, s, &mut prod)?;
            scalar.subtract_assign(t, &prod)?;
        }
        Ok(())
    }

    fn rows_of(&self, a: &MatrixMember<S::Value>) -> Result<Rows<S::Value>> {
        (0..a.rows()).map(|r| a.row_values(r)).collect()
    }

    /// Determinant: the signed product of the pivots, multiplied in
    /// elimination order.
    pub fn det(&self, a: &MatrixMember<S::Value>, out: &mut S::Value) -> Result<()> {
        self.require_square(a, "determinant")?;
        let scalar = self.scalar();
        let n = a.rows();
        let mut m = self.rows_of(a)?;
        let mut det = scalar.construct();
        scalar.unity(&mut det)?;
        let mut negate = false;
        let (mut inv, mut factor) = (scalar.construct(), scalar.construct());
        for k in 0..n {
            let Some(p) = self.pivot_row(&m, k, k) else {
                debug!(column = k, "singular matrix in determinant");
                *out = scalar.construct();
                return Ok(());
            };
            if p != k {
                m.swap(p, k);
                negate = !negate;
            }
            scalar.invert(&m[k][k], &mut inv)?;
            let (upper, lower) = m.split_at_mut(k + 1);
            let pivot_row = &upper[k];
            for row in lower.iter_mut() {
                scalar.multiply(&row[k], &inv, &mut factor)?;
                self.eliminate(row, &factor, pivot_row, k)?;
            }
            scalar.multiply_assign(&mut det, &pivot_row[k])?;
        }
        if negate {
            scalar.negate_assign(&mut det)?;
        }
        *out = det;
        Ok(())
    }

    /// Gauss-Jordan elimination on `[a | I]`.
    fn gauss_jordan(&self, a: &MatrixMember<S::Value>) -> Result<MatrixMember<S::Value>> {
        self.require_square(a, "inverse")?;
        let scalar = self.scalar();
        let n = a.rows();
        let mut one = scalar.construct();
        scalar.unity(&mut one)?;
        let mut m = self.rows_of(a)?;
        for (r, row) in m.iter_mut().enumerate() {
            row.extend((0..n).map(|c| if c == r { one.clone() } else { scalar.construct() }));
        }

        let mut inv = scalar.construct();
        for k in 0..n {
            let p = self
                .pivot_row(&m, k, k)
                .ok_or(AlgebraError::DegenerateOperand("singular matrix"))?;
            m.swap(p, k);
            scalar.invert(&m[k][k], &mut inv)?;
            let mut normalized = Vec::with_capacity(2 * n);
            for x in &m[k] {
                let mut y = scalar.construct();
                scalar.multiply(&inv, x, &mut y)?;
                normalized.push(y);
            }
            for (r, row) in m.iter_mut().enumerate() {
                if r == k || scalar.is_zero(&row[k]) {
                    continue;
                }
                let factor = row[k].clone();
                self.eliminate(row, &factor, &normalized, 0)?;
            }
            m[k] = normalized;
        }

        let mut out = self.like(a, n, n);
        for (r, row) in m.iter().enumerate() {
            for (c, x) in row[n..].iter().enumerate() {
                out.set(r, c, x)?;
            }
        }
        Ok(out)
    }
}

impl<S: Additive + Invertible> Invertible for MatrixAlgebra<S> {
    /// Fails with [`AlgebraError::DegenerateOperand`] for singular matrices.
    fn invert(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        *b = self.gauss_jordan(a)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use bigdecimal::BigDecimal;
    use octalg_core::{
        algebra::{Algebra, Multiplicative, Random, Tolerance},
        storage::StorageConstruction,
    };
    use octalg_octonion::{OctonionAlgebra, OctonionValue};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn alg() -> MatrixAlgebra<OctonionAlgebra> {
        MatrixAlgebra::new(OctonionAlgebra::new())
    }

    fn matrix(s: &str) -> MatrixMember<OctonionValue> {
        alg().construct_from_str(s).unwrap()
    }

    fn oct(s: &str) -> OctonionValue {
        s.parse().unwrap()
    }

    fn tol() -> BigDecimal {
        BigDecimal::from_str("1e-40").unwrap()
    }

    #[test]
    fn determinants() -> anyhow::Result<()> {
        let alg = alg();
        let mut d = OctonionValue::default();
        alg.det(&matrix("[[1,0][0,1]]"), &mut d)?;
        assert!(alg.scalar().is_unity(&d));
        alg.det(&matrix("[[1,2][3,4]]"), &mut d)?;
        assert!(alg.scalar().within(&tol(), &d, &oct("-2"))?);
        // one row swap
        alg.det(&matrix("[[0,1][1,0]]"), &mut d)?;
        assert_eq!(d, oct("-1"));
        alg.det(&matrix("[[2,0,0][0,{0,1},0][0,0,3]]"), &mut d)?;
        assert!(alg.scalar().within(&tol(), &d, &oct("{0,6}"))?);
        alg.det(&matrix("[[1,2][2,4]]"), &mut d)?;
        assert!(alg.scalar().is_zero(&d));
        assert!(alg.det(&matrix("[[1,2]]"), &mut d).is_err());
        Ok(())
    }

    #[test]
    fn determinant_is_continuous_across_equal_norm_rows() -> anyhow::Result<()> {
        let alg = alg();
        let scalar = alg.scalar();
        let mut rng = StdRng::seed_from_u64(5);
        let [a, b, d] = [(); 3].map(|_| {
            let mut v = scalar.construct();
            scalar.random_using(&mut rng, &mut v);
            v
        });
        let mut inv_a = scalar.construct();
        scalar.invert(&a, &mut inv_a)?;

        let mut dets = Vec::new();
        for ratio in ["0.999999", "1.000001"] {
            let mut c = scalar.construct();
            scalar.multiply(&oct(ratio), &a, &mut c)?;
            let mut m = alg.construct_with(StorageConstruction::MemArray, 2, 2);
            m.set(0, 0, &a)?;
            m.set(0, 1, &b)?;
            m.set(1, 0, &c)?;
            m.set(1, 1, &d)?;
            let mut det = scalar.construct();
            alg.det(&m, &mut det)?;

            // a * (d - (c * a^-1) * b)
            let (mut factor, mut fb, mut schur, mut expected) = (
                scalar.construct(),
                scalar.construct(),
                scalar.construct(),
                scalar.construct(),
            );
            scalar.multiply(&c, &inv_a, &mut factor)?;
            scalar.multiply(&factor, &b, &mut fb)?;
            scalar.subtract(&d, &fb, &mut schur)?;
            scalar.multiply(&a, &schur, &mut expected)?;
            assert!(scalar.within(&tol(), &det, &expected)?, "{det} vs {expected}");
            dets.push(det);
        }
        let step = BigDecimal::from_str("1e-4").unwrap();
        assert!(scalar.within(&step, &dets[0], &dets[1])?);
        Ok(())
    }

    #[test]
    fn inverse_times_matrix_is_identity() -> anyhow::Result<()> {
        let alg = alg();
        for text in ["[[1,2][3,4]]", "[[0,{0,1}][{0,0,1},1]]", "[[4,1,0][1,4,1][0,1,4]]"] {
            let a = matrix(text);
            let (mut inv, mut prod) = (alg.construct(), alg.construct());
            alg.invert(&a, &mut inv)?;
            alg.multiply(&a, &inv, &mut prod)?;
            let mut id = prod.clone();
            alg.unity(&mut id)?;
            assert!(alg.within(&tol(), &prod, &id)?, "{text}: {prod}");
        }
        Ok(())
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let alg = alg();
        let a = matrix("[[1,2][2,4]]");
        let mut out = matrix("[[7]]");
        assert_eq!(
            alg.invert(&a, &mut out),
            Err(AlgebraError::DegenerateOperand("singular matrix"))
        );
        assert_eq!(out, matrix("[[7]]"));
    }

    #[test]
    fn divide_by_inverse() -> anyhow::Result<()> {
        let alg = alg();
        let a = matrix("[[2,0][0,4]]");
        let mut q = alg.construct();
        alg.divide(&a, &a, &mut q)?;
        assert!(alg.is_unity(&q));
        alg.invert(&a, &mut q)?;
        assert_eq!(q, matrix("[[0.5,0][0,0.25]]"));
        Ok(())
    }
}
