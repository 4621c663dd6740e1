//! Dense and sparse matrices over a scalar algebra.
//!
//! Elements are stored row-major: `(r, c)` lives at offset `r * cols + c`.
//! Products never assume the scalar multiplication commutes or associates;
//! every sum of products keeps the left factor on the left.

use alloc::{format, vec::Vec};
use core::fmt;

use bigdecimal::BigDecimal;
use num_rational::BigRational;
use octalg_core::{
    algebra::{
        Additive, Algebra, Conjugate, HighPrecision, Multiplicative, Random, Scalable, Tolerance,
    },
    algorithm::{fixed_transform2, sequences_similar, transform2, transform3},
    error::{AlgebraError, Result},
    primitive::{DecimalComponents, Primitive, PrimitiveArrays, fill, flatten},
    storage::{IndexedStorage, Storage, StorageConstruction, ThreadAccess},
    text::{parse_shaped, write_nested},
};
use octalg_decimal::MathContext;
use rand::Rng;
use tracing::debug;

use crate::{
    config::{SpectralNormConfig, TaylorTerms},
    rmodule::RModuleMember,
};

/// A row-major matrix over values `V`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatrixMember<V: Clone> {
    rows: usize,
    cols: usize,
    storage: Storage<V>,
}

impl<V: Clone> MatrixMember<V> {
    /// A `rows x cols` matrix of `zero`.
    pub fn zeroed(construction: StorageConstruction, rows: usize, cols: usize, zero: V) -> Self {
        MatrixMember {
            rows,
            cols,
            storage: Storage::allocate(construction, rows * cols, zero),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether rows equal columns.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn offset(&self, r: usize, c: usize) -> Result<usize> {
        if r >= self.rows {
            return Err(AlgebraError::out_of_bounds(r, self.rows));
        }
        if c >= self.cols {
            return Err(AlgebraError::out_of_bounds(c, self.cols));
        }
        Ok(r * self.cols + c)
    }

    /// Entry at row `r`, column `c`.
    pub fn get(&self, r: usize, c: usize) -> Result<&V> {
        self.storage.get(self.offset(r, c)?)
    }

    /// Overwrites the entry at row `r`, column `c`.
    pub fn set(&mut self, r: usize, c: usize, value: &V) -> Result<()> {
        let offset = self.offset(r, c)?;
        self.storage.set(offset, value)
    }

    /// Backing storage.
    pub fn storage(&self) -> &Storage<V> {
        &self.storage
    }

    /// Access mode of the backing storage.
    pub fn thread_access(&self) -> ThreadAccess {
        self.storage.thread_access()
    }

    pub(crate) fn row_values(&self, r: usize) -> Result<Vec<V>> {
        (0..self.cols).map(|c| self.get(r, c).cloned()).collect()
    }

    pub(crate) fn same_shape(&self, other: &Self) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(AlgebraError::shape_mismatch(
                &[self.rows, self.cols],
                &[other.rows, other.cols],
            ));
        }
        Ok(())
    }
}

impl<V: Clone + fmt::Display> fmt::Display for MatrixMember<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, &[self.rows, self.cols], |w, i| match self.storage.get(i) {
            Ok(v) => write!(w, "{v}"),
            Err(_) => Err(fmt::Error),
        })
    }
}

impl<V: Clone + DecimalComponents> PrimitiveArrays for MatrixMember<V> {
    fn primitive_len(&self) -> usize {
        self.storage.size() * V::COMPONENTS
    }

    fn get_as<P: Primitive>(&self) -> Vec<P> {
        flatten(&self.storage)
    }

    fn set_from<P: Primitive>(&mut self, values: &[P]) -> Result<()> {
        fill(&mut self.storage, values)
    }
}

/// Matrix operations built from the operations of the scalar algebra `S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MatrixAlgebra<S> {
    scalar: S,
    taylor: TaylorTerms,
    spectral: SpectralNormConfig,
}

impl<S: Algebra> MatrixAlgebra<S> {
    /// Matrices over `scalar` with default series configuration.
    pub fn new(scalar: S) -> Self {
        MatrixAlgebra {
            scalar,
            taylor: TaylorTerms::default(),
            spectral: SpectralNormConfig::default(),
        }
    }

    /// Replaces the Taylor series lengths.
    pub fn with_taylor_terms(self, taylor: TaylorTerms) -> Self {
        MatrixAlgebra { taylor, ..self }
    }

    /// Replaces the spectral norm limits.
    pub fn with_spectral_norm_config(self, spectral: SpectralNormConfig) -> Self {
        MatrixAlgebra { spectral, ..self }
    }

    /// The entry algebra.
    pub fn scalar(&self) -> &S {
        &self.scalar
    }

    /// Taylor series lengths in use.
    pub fn taylor_terms(&self) -> &TaylorTerms {
        &self.taylor
    }

    /// Spectral norm limits in use.
    pub fn spectral_norm_config(&self) -> &SpectralNormConfig {
        &self.spectral
    }

    /// A `rows x cols` zero matrix in storage of kind `construction`.
    pub fn construct_with(
        &self,
        construction: StorageConstruction,
        rows: usize,
        cols: usize,
    ) -> MatrixMember<S::Value> {
        MatrixMember::zeroed(construction, rows, cols, self.scalar.construct())
    }

    /// Matrix whose `r`-th row is `rows[r]`; ragged input is rejected.
    pub fn construct_from_rows(&self, rows: Vec<Vec<S::Value>>) -> Result<MatrixMember<S::Value>> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(AlgebraError::invalid("rows of inconsistent dimension"));
        }
        Ok(MatrixMember {
            rows: rows.len(),
            cols,
            storage: Storage::from_values(rows.into_iter().flatten().collect(), self.scalar.construct()),
        })
    }

    /// Resizes `a` to `rows x cols` zeros unless it already has that shape.
    pub fn alloc(&self, a: &mut MatrixMember<S::Value>, rows: usize, cols: usize) {
        if a.rows != rows || a.cols != cols {
            a.storage.reallocate(rows * cols);
            a.rows = rows;
            a.cols = cols;
        }
    }

    /// Reshapes `a` to `rows x cols` and zeroes every entry, keeping its
    /// storage kind.
    pub fn init(&self, a: &mut MatrixMember<S::Value>, rows: usize, cols: usize) {
        self.alloc(a, rows, cols);
        a.storage.fill_zero();
    }

    pub(crate) fn like(&self, a: &MatrixMember<S::Value>, rows: usize, cols: usize) -> MatrixMember<S::Value> {
        self.construct_with(a.storage.construction(), rows, cols)
    }

    pub(crate) fn require_square(&self, a: &MatrixMember<S::Value>, operation: &str) -> Result<()> {
        if !a.is_square() {
            return Err(AlgebraError::invalid(format!(
                "{operation} of a non-square {}x{} matrix",
                a.rows, a.cols
            )));
        }
        Ok(())
    }

    fn zip_with<F>(
        &self,
        a: &MatrixMember<S::Value>,
        b: &MatrixMember<S::Value>,
        c: &mut MatrixMember<S::Value>,
        op: F,
    ) -> Result<()>
    where
        F: FnMut(&S::Value, &S::Value, &mut S::Value) -> Result<()>,
    {
        a.same_shape(b)?;
        let mut out = a.clone();
        transform3(&a.storage, &b.storage, &mut out.storage, op)?;
        *c = out;
        Ok(())
    }

    fn map_with<F>(&self, a: &MatrixMember<S::Value>, b: &mut MatrixMember<S::Value>, op: F) -> Result<()>
    where
        F: FnMut(&S::Value, &mut S::Value) -> Result<()>,
    {
        let mut out = a.clone();
        transform2(&a.storage, &mut out.storage, op)?;
        *b = out;
        Ok(())
    }

    /// `b = aᵀ`.
    pub fn transpose(&self, a: &MatrixMember<S::Value>, b: &mut MatrixMember<S::Value>) -> Result<()> {
        let mut out = self.like(a, a.cols, a.rows);
        for r in 0..a.rows {
            for c in 0..a.cols {
                out.set(c, r, a.get(r, c)?)?;
            }
        }
        *b = out;
        Ok(())
    }

    /// Row `r` as a vector.
    pub fn row(&self, a: &MatrixMember<S::Value>, r: usize, out: &mut RModuleMember<S::Value>) -> Result<()> {
        if r >= a.rows {
            return Err(AlgebraError::out_of_bounds(r, a.rows));
        }
        *out = RModuleMember::from_values(a.row_values(r)?, self.scalar.construct());
        Ok(())
    }

    /// Column `c` as a vector.
    pub fn column(
        &self,
        a: &MatrixMember<S::Value>,
        c: usize,
        out: &mut RModuleMember<S::Value>,
    ) -> Result<()> {
        if c >= a.cols {
            return Err(AlgebraError::out_of_bounds(c, a.cols));
        }
        let values = (0..a.rows)
            .map(|r| a.get(r, c).cloned())
            .collect::<Result<Vec<_>>>()?;
        *out = RModuleMember::from_values(values, self.scalar.construct());
        Ok(())
    }
}

impl<S: Algebra> Algebra for MatrixAlgebra<S> {
    type Value = MatrixMember<S::Value>;

    fn type_name(&self) -> &'static str {
        "matrix"
    }

    fn construct(&self) -> Self::Value {
        self.construct_with(StorageConstruction::MemArray, 0, 0)
    }

    /// Parses `[[a,b][c,d]]`, each element in the scalar algebra's notation.
    fn construct_from_str(&self, s: &str) -> Result<Self::Value> {
        let (dims, leaves) = parse_shaped(s)?;
        let [rows, cols] = dims[..] else {
            return Err(AlgebraError::invalid(format!(
                "expected a matrix, found nesting depth {}",
                dims.len()
            )));
        };
        let values = leaves
            .iter()
            .map(|leaf| self.scalar.construct_from_str(leaf))
            .collect::<Result<Vec<_>>>()?;
        Ok(MatrixMember {
            rows,
            cols,
            storage: Storage::from_values(values, self.scalar.construct()),
        })
    }

    fn is_equal(&self, a: &Self::Value, b: &Self::Value) -> bool {
        a.same_shape(b).is_ok()
            && a.storage
                .iter()
                .zip(b.storage.iter())
                .all(|(x, y)| self.scalar.is_equal(x, y))
    }

    fn zero(&self, a: &mut Self::Value) {
        a.storage.fill_zero();
    }

    fn is_zero(&self, a: &Self::Value) -> bool {
        a.storage.iter().all(|x| self.scalar.is_zero(x))
    }
}

impl<S: Additive> Additive for MatrixAlgebra<S> {
    fn add(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()> {
        self.zip_with(a, b, c, |x, y, z| self.scalar.add(x, y, z))
    }

    fn subtract(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()> {
        self.zip_with(a, b, c, |x, y, z| self.scalar.subtract(x, y, z))
    }

    fn negate(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.map_with(a, b, |x, y| self.scalar.negate(x, y))
    }
}

impl<S: Additive + Multiplicative> MatrixAlgebra<S> {
    /// The `n x n` identity.
    pub fn identity(&self, n: usize) -> Result<MatrixMember<S::Value>> {
        self.identity_with(StorageConstruction::MemArray, n)
    }

    fn identity_with(
        &self,
        construction: StorageConstruction,
        n: usize,
    ) -> Result<MatrixMember<S::Value>> {
        let mut out = self.construct_with(construction, n, n);
        let mut one = self.scalar.construct();
        self.scalar.unity(&mut one)?;
        for i in 0..n {
            out.set(i, i, &one)?;
        }
        Ok(out)
    }

    /// `Σ_k a[i][k] * b[k][j]` at `(i, j)`.
    fn product_entry(
        &self,
        a: &MatrixMember<S::Value>,
        b: &MatrixMember<S::Value>,
        i: usize,
        j: usize,
    ) -> Result<S::Value> {
        let mut sum = self.scalar.construct();
        let mut prod = self.scalar.construct();
        for k in 0..a.cols {
            self.scalar.multiply(a.get(i, k)?, b.get(k, j)?, &mut prod)?;
            self.scalar.add_assign(&mut sum, &prod)?;
        }
        Ok(sum)
    }

    /// `out = a x` for a vector given by its elements.
    pub(crate) fn apply(&self, a: &MatrixMember<S::Value>, x: &[S::Value]) -> Result<Vec<S::Value>> {
        let mut prod = self.scalar.construct();
        (0..a.rows)
            .map(|r| -> Result<S::Value> {
                let mut sum = self.scalar.construct();
                for (c, y) in x.iter().enumerate() {
                    self.scalar.multiply(a.get(r, c)?, y, &mut prod)?;
                    self.scalar.add_assign(&mut sum, &prod)?;
                }
                Ok(sum)
            })
            .collect()
    }

    /// Sum of the diagonal of a square matrix.
    pub fn trace(&self, a: &MatrixMember<S::Value>, out: &mut S::Value) -> Result<()> {
        self.require_square(a, "trace")?;
        let mut sum = self.scalar.construct();
        for i in 0..a.rows {
            self.scalar.add_assign(&mut sum, a.get(i, i)?)?;
        }
        *out = sum;
        Ok(())
    }

    /// Kronecker product: block `(i, j)` of `c` is `a[i][j] * b`.
    pub fn direct_product(
        &self,
        a: &MatrixMember<S::Value>,
        b: &MatrixMember<S::Value>,
        c: &mut MatrixMember<S::Value>,
    ) -> Result<()> {
        let mut out = self.like(a, a.rows * b.rows, a.cols * b.cols);
        let mut prod = self.scalar.construct();
        for i in 0..a.rows {
            for j in 0..a.cols {
                let x = a.get(i, j)?;
                for k in 0..b.rows {
                    for l in 0..b.cols {
                        self.scalar.multiply(x, b.get(k, l)?, &mut prod)?;
                        out.set(i * b.rows + k, j * b.cols + l, &prod)?;
                    }
                }
            }
        }
        *c = out;
        Ok(())
    }
}

impl<S: Additive + Multiplicative> Multiplicative for MatrixAlgebra<S> {
    fn multiply(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()> {
        if a.cols != b.rows {
            return Err(AlgebraError::shape_mismatch(
                &[a.rows, a.cols],
                &[b.rows, b.cols],
            ));
        }
        debug!(rows = a.rows, inner = a.cols, cols = b.cols, "matrix multiply");
        let mut out = self.like(a, a.rows, b.cols);
        for i in 0..a.rows {
            for j in 0..b.cols {
                out.set(i, j, &self.product_entry(a, b, i, j)?)?;
            }
        }
        *c = out;
        Ok(())
    }

    /// Identity of the same size; fails for non-square matrices.
    fn unity(&self, a: &mut Self::Value) -> Result<()> {
        self.require_square(a, "unity")?;
        *a = self.identity_with(a.storage.construction(), a.rows)?;
        Ok(())
    }

    fn is_unity(&self, a: &Self::Value) -> bool {
        a.is_square()
            && (0..a.rows).all(|r| {
                (0..a.cols).all(|c| match a.get(r, c) {
                    Ok(x) if r == c => self.scalar.is_unity(x),
                    Ok(x) => self.scalar.is_zero(x),
                    Err(_) => false,
                })
            })
    }
}

impl<S: Conjugate> Conjugate for MatrixAlgebra<S> {
    fn conjugate(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.map_with(a, b, |x, y| self.scalar.conjugate(x, y))
    }
}

impl<S: Conjugate> MatrixAlgebra<S> {
    /// `b` is the transpose of `a` with every entry conjugated.
    pub fn conjugate_transpose(
        &self,
        a: &MatrixMember<S::Value>,
        b: &mut MatrixMember<S::Value>,
    ) -> Result<()> {
        let mut t = self.construct();
        self.transpose(a, &mut t)?;
        self.conjugate(&t, b)
    }
}

impl<S: HighPrecision> HighPrecision for MatrixAlgebra<S> {
    fn math_context(&self) -> &MathContext {
        self.scalar.math_context()
    }
}

impl<S: Tolerance> Tolerance for MatrixAlgebra<S> {
    /// Same shape and every element within `tol`.
    fn within(&self, tol: &BigDecimal, a: &Self::Value, b: &Self::Value) -> Result<bool> {
        if a.same_shape(b).is_err() {
            return Ok(false);
        }
        sequences_similar(&self.scalar, tol, &a.storage, &b.storage)
    }
}

impl<S: Scalable + Multiplicative> Scalable for MatrixAlgebra<S> {
    type Scalar = S::Value;

    /// `b[r][c] = factor * a[r][c]`.
    fn scale(&self, factor: &S::Value, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        let mut out = a.clone();
        fixed_transform2(factor, &a.storage, &mut out.storage, |f, x, y| {
            self.scalar.multiply(f, x, y)
        })?;
        *b = out;
        Ok(())
    }

    fn scale_by_high_prec(
        &self,
        factor: &BigDecimal,
        a: &Self::Value,
        b: &mut Self::Value,
    ) -> Result<()> {
        self.map_with(a, b, |x, y| self.scalar.scale_by_high_prec(factor, x, y))
    }

    fn scale_by_rational(
        &self,
        factor: &BigRational,
        a: &Self::Value,
        b: &mut Self::Value,
    ) -> Result<()> {
        self.map_with(a, b, |x, y| self.scalar.scale_by_rational(factor, x, y))
    }
}

impl<S: Random> Random for MatrixAlgebra<S> {
    fn random_using<R: Rng + ?Sized>(&self, rng: &mut R, a: &mut Self::Value) {
        let values = (0..a.rows * a.cols)
            .map(|_| {
                let mut v = self.scalar.construct();
                self.scalar.random_using(rng, &mut v);
                v
            })
            .collect();
        let zero = self.scalar.construct();
        a.storage = Storage::from_values_as(a.storage.construction(), values, zero);
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};
    use core::str::FromStr;

    use octalg_octonion::{OctonionAlgebra, OctonionValue};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    type Matrix = MatrixMember<OctonionValue>;

    fn alg() -> MatrixAlgebra<OctonionAlgebra> {
        MatrixAlgebra::new(OctonionAlgebra::new())
    }

    fn matrix(s: &str) -> Matrix {
        alg().construct_from_str(s).unwrap()
    }

    fn oct(s: &str) -> OctonionValue {
        s.parse().unwrap()
    }

    #[test]
    fn parse_display_and_shape() -> anyhow::Result<()> {
        let m = matrix("[[1,{0,1}][2,3][4,5]]");
        assert_eq!((m.rows(), m.cols()), (3, 2));
        assert_eq!(m.get(0, 1)?, &oct("{0,1}"));
        assert_eq!(alg().construct_from_str(&m.to_string())?, m);
        assert!(matches!(
            alg().construct_from_str("[[1,2][3]]"),
            Err(AlgebraError::InvalidArgument(_))
        ));
        assert!(alg().construct_from_str("[1,2]").is_err());
        assert!(m.get(3, 0).is_err());
        Ok(())
    }

    #[test]
    fn identity_is_unity() -> anyhow::Result<()> {
        let alg = alg();
        let mut m = alg.construct_with(StorageConstruction::MemSparse, 2, 2);
        alg.unity(&mut m)?;
        assert!(alg.is_unity(&m));
        assert_eq!(m.thread_access(), ThreadAccess::Confined);
        assert!(alg.is_unity(&matrix("[[1,0][0,1]]")));
        assert!(!alg.is_unity(&matrix("[[1,0][1,1]]")));
        let mut rect = alg.construct_with(StorageConstruction::MemArray, 2, 3);
        assert!(alg.unity(&mut rect).is_err());
        Ok(())
    }

    #[test]
    fn multiply_keeps_operand_order() -> anyhow::Result<()> {
        let alg = alg();
        let i = matrix("[[{0,1}]]");
        let j = matrix("[[{0,0,1}]]");
        let (mut ij, mut ji) = (alg.construct(), alg.construct());
        alg.multiply(&i, &j, &mut ij)?;
        alg.multiply(&j, &i, &mut ji)?;
        assert_eq!(ij, matrix("[[{0,0,0,1}]]"));
        assert_eq!(ji, matrix("[[{0,0,0,-1}]]"));

        let a = matrix("[[1,2,3][4,5,6]]");
        let b = matrix("[[1,0][0,1][1,1]]");
        let mut c = alg.construct();
        alg.multiply(&a, &b, &mut c)?;
        assert_eq!(c, matrix("[[4,5][10,11]]"));
        let before = c.clone();
        assert!(matches!(
            alg.multiply(&a, &a, &mut c),
            Err(AlgebraError::ShapeMismatch { .. })
        ));
        assert_eq!(c, before);

        let mut p = alg.construct();
        alg.power(3, &matrix("[[1,1][0,1]]"), &mut p)?;
        assert_eq!(p, matrix("[[1,3][0,1]]"));
        Ok(())
    }

    #[test]
    fn transposes_trace_rows_and_columns() -> anyhow::Result<()> {
        let alg = alg();
        let a = matrix("[[1,{0,1}][{0,0,1},4]]");
        let mut t = alg.construct();
        alg.transpose(&a, &mut t)?;
        assert_eq!(t, matrix("[[1,{0,0,1}][{0,1},4]]"));
        alg.conjugate_transpose(&a, &mut t)?;
        assert_eq!(t, matrix("[[1,{0,0,-1}][{0,-1},4]]"));

        let mut tr = OctonionValue::default();
        alg.trace(&a, &mut tr)?;
        assert_eq!(tr, oct("5"));

        let mut v = RModuleMember::from_values(vec![], OctonionValue::default());
        alg.row(&a, 1, &mut v)?;
        assert_eq!(v.get(0)?, &oct("{0,0,1}"));
        alg.column(&a, 1, &mut v)?;
        assert_eq!(v.get(0)?, &oct("{0,1}"));
        assert!(alg.column(&a, 2, &mut v).is_err());
        Ok(())
    }

    #[test]
    fn kronecker_product() -> anyhow::Result<()> {
        let alg = alg();
        let a = matrix("[[1,2][3,4]]");
        let b = matrix("[[0,1][1,0]]");
        let mut c = alg.construct();
        alg.direct_product(&a, &b, &mut c)?;
        assert_eq!(
            c,
            matrix("[[0,1,0,2][1,0,2,0][0,3,0,4][3,0,4,0]]")
        );
        Ok(())
    }

    #[test]
    fn element_arithmetic() -> anyhow::Result<()> {
        let alg = alg();
        let a = matrix("[[1,2][3,4]]");
        let mut c = alg.construct();
        alg.add(&a, &a, &mut c)?;
        let mut half = alg.construct();
        alg.scale_by_one_half(1, &c, &mut half)?;
        assert_eq!(half, a);
        alg.scale(&oct("{0,1}"), &a, &mut c)?;
        assert_eq!(c, matrix("[[{0,1},{0,2}][{0,3},{0,4}]]"));
        let tol = BigDecimal::from_str("0.1").unwrap();
        assert!(alg.within(&tol, &a, &matrix("[[1.05,2][3,4]]"))?);
        assert!(!alg.within(&tol, &a, &matrix("[[1,2,0][3,4,0]]"))?);
        assert!(alg.add(&a, &matrix("[[1]]"), &mut c).is_err());
        Ok(())
    }

    #[test]
    fn alloc_and_primitives() -> anyhow::Result<()> {
        let alg = alg();
        let mut m = alg.construct();
        alg.alloc(&mut m, 1, 2);
        assert_eq!((m.rows(), m.cols()), (1, 2));
        m.set_from_longs(&(0..16).collect::<Vec<i64>>())?;
        assert_eq!(m.get(0, 1)?.r(), &BigDecimal::from(8));
        alg.alloc(&mut m, 1, 2);
        assert_eq!(m.get(0, 1)?.r(), &BigDecimal::from(8));
        assert_eq!(m.get_as_int_array().len(), 16);

        alg.init(&mut m, 1, 2);
        assert!(alg.is_zero(&m));
        alg.init(&mut m, 2, 3);
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert!(alg.is_zero(&m));
        Ok(())
    }

    #[test]
    fn sparse_matrices_stay_sparse() -> anyhow::Result<()> {
        let alg = alg();
        let mut m = alg.construct_with(StorageConstruction::MemSparse, 2, 2);
        m.set(1, 0, &oct("3"))?;
        alg.init(&mut m, 2, 2);
        assert!(alg.is_zero(&m));
        let mut rng = StdRng::seed_from_u64(4);
        alg.random_using(&mut rng, &mut m);
        assert!(!alg.is_zero(&m));
        assert_eq!(m.thread_access(), ThreadAccess::Confined);
        Ok(())
    }
}
