//! Vectors over a scalar algebra.

use alloc::{format, vec::Vec};
use core::fmt;

use bigdecimal::BigDecimal;
use num_rational::BigRational;
use octalg_core::{
    algebra::{
        Additive, Algebra, Conjugate, HighPrecision, Multiplicative, Normed, Random, Scalable,
        Tolerance,
    },
    algorithm::{fixed_transform2, sequences_similar, transform2, transform3},
    error::{AlgebraError, Result},
    primitive::{DecimalComponents, Primitive, PrimitiveArrays, fill, flatten},
    storage::{IndexedStorage, Storage, StorageConstruction, ThreadAccess},
    text::{parse_shaped, write_nested},
};
use octalg_decimal::MathContext;
use rand::Rng;

use crate::matrix::MatrixMember;

/// A vector of fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RModuleMember<V: Clone> {
    storage: Storage<V>,
}

impl<V: Clone> RModuleMember<V> {
    /// A dense vector holding `values`.
    pub fn from_values(values: Vec<V>, zero: V) -> Self {
        RModuleMember {
            storage: Storage::from_values(values, zero),
        }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.storage.size()
    }

    /// Whether the vector has no components.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Component `i`.
    pub fn get(&self, i: usize) -> Result<&V> {
        self.storage.get(i)
    }

    /// Overwrites component `i`.
    pub fn set(&mut self, i: usize, value: &V) -> Result<()> {
        self.storage.set(i, value)
    }

    /// Components in order.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.storage.iter()
    }

    /// Backing storage.
    pub fn storage(&self) -> &Storage<V> {
        &self.storage
    }

    /// Access mode of the backing storage.
    pub fn thread_access(&self) -> ThreadAccess {
        self.storage.thread_access()
    }
}

impl<V: Clone + fmt::Display> fmt::Display for RModuleMember<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, &[self.len()], |w, i| match self.storage.get(i) {
            Ok(v) => write!(w, "{v}"),
            Err(_) => Err(fmt::Error),
        })
    }
}

impl<V: Clone + DecimalComponents> PrimitiveArrays for RModuleMember<V> {
    fn primitive_len(&self) -> usize {
        self.len() * V::COMPONENTS
    }

    fn get_as<P: Primitive>(&self) -> Vec<P> {
        flatten(&self.storage)
    }

    fn set_from<P: Primitive>(&mut self, values: &[P]) -> Result<()> {
        fill(&mut self.storage, values)
    }
}

/// Vector operations built from the operations of the scalar algebra `S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RModuleAlgebra<S> {
    scalar: S,
}

impl<S: Algebra> RModuleAlgebra<S> {
    /// Vectors over `scalar`.
    pub fn new(scalar: S) -> Self {
        RModuleAlgebra { scalar }
    }

    /// The component algebra.
    pub fn scalar(&self) -> &S {
        &self.scalar
    }

    /// A zero vector of length `len`.
    pub fn construct_with(
        &self,
        construction: StorageConstruction,
        len: usize,
    ) -> RModuleMember<S::Value> {
        RModuleMember {
            storage: Storage::allocate(construction, len, self.scalar.construct()),
        }
    }

    /// A dense vector holding `values`.
    pub fn construct_from_values(&self, values: Vec<S::Value>) -> RModuleMember<S::Value> {
        RModuleMember::from_values(values, self.scalar.construct())
    }

    /// `values` in the storage kind of `like`.
    fn values_like(
        &self,
        like: &RModuleMember<S::Value>,
        values: Vec<S::Value>,
    ) -> RModuleMember<S::Value> {
        let zero = self.scalar.construct();
        RModuleMember {
            storage: Storage::from_values_as(like.storage.construction(), values, zero),
        }
    }

    /// Resizes `a` to `len` zero elements unless it already has that length.
    pub fn alloc(&self, a: &mut RModuleMember<S::Value>, len: usize) {
        if a.len() != len {
            a.storage.reallocate(len);
        }
    }

    /// Resizes `a` to `len` and zeroes every element, keeping its storage kind.
    pub fn init(&self, a: &mut RModuleMember<S::Value>, len: usize) {
        self.alloc(a, len);
        a.storage.fill_zero();
    }

    fn zip_with<F>(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        c: &mut RModuleMember<S::Value>,
        op: F,
    ) -> Result<()>
    where
        F: FnMut(&S::Value, &S::Value, &mut S::Value) -> Result<()>,
    {
        let mut out = a.clone();
        transform3(&a.storage, &b.storage, &mut out.storage, op)?;
        *c = out;
        Ok(())
    }

    fn map_with<F>(
        &self,
        a: &RModuleMember<S::Value>,
        b: &mut RModuleMember<S::Value>,
        op: F,
    ) -> Result<()>
    where
        F: FnMut(&S::Value, &mut S::Value) -> Result<()>,
    {
        let mut out = a.clone();
        transform2(&a.storage, &mut out.storage, op)?;
        *b = out;
        Ok(())
    }
}

fn require_len<V: Clone>(a: &RModuleMember<V>, len: usize) -> Result<()> {
    if a.len() != len {
        return Err(AlgebraError::shape_mismatch(&[a.len()], &[len]));
    }
    Ok(())
}

impl<S: Algebra> Algebra for RModuleAlgebra<S> {
    type Value = RModuleMember<S::Value>;

    fn type_name(&self) -> &'static str {
        "vector"
    }

    fn construct(&self) -> Self::Value {
        self.construct_with(StorageConstruction::MemArray, 0)
    }

    /// Parses `[a,b,...]`, each element in the scalar algebra's notation.
    fn construct_from_str(&self, s: &str) -> Result<Self::Value> {
        let (dims, leaves) = parse_shaped(s)?;
        if dims.len() != 1 {
            return Err(AlgebraError::invalid(format!(
                "expected a vector, found nesting depth {}",
                dims.len()
            )));
        }
        let values = leaves
            .iter()
            .map(|leaf| self.scalar.construct_from_str(leaf))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.construct_from_values(values))
    }

    fn is_equal(&self, a: &Self::Value, b: &Self::Value) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| self.scalar.is_equal(x, y))
    }

    fn zero(&self, a: &mut Self::Value) {
        a.storage.fill_zero();
    }

    fn is_zero(&self, a: &Self::Value) -> bool {
        a.iter().all(|x| self.scalar.is_zero(x))
    }
}

impl<S: Additive> Additive for RModuleAlgebra<S> {
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

impl<S: Conjugate> Conjugate for RModuleAlgebra<S> {
    fn conjugate(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.map_with(a, b, |x, y| self.scalar.conjugate(x, y))
    }
}

impl<S: HighPrecision> HighPrecision for RModuleAlgebra<S> {
    fn math_context(&self) -> &MathContext {
        self.scalar.math_context()
    }
}

impl<S: Normed + HighPrecision> Normed for RModuleAlgebra<S> {
    /// Euclidean norm: square root of the summed squared element norms.
    fn norm(&self, a: &Self::Value, out: &mut BigDecimal) -> Result<()> {
        let mut sum = BigDecimal::default();
        let mut n = BigDecimal::default();
        for x in a.iter() {
            self.scalar.norm(x, &mut n)?;
            sum += n.square();
        }
        *out = self.scalar.math_context().sqrt(&sum)?;
        Ok(())
    }
}

impl<S: Tolerance> Tolerance for RModuleAlgebra<S> {
    fn within(&self, tol: &BigDecimal, a: &Self::Value, b: &Self::Value) -> Result<bool> {
        sequences_similar(&self.scalar, tol, &a.storage, &b.storage)
    }
}

impl<S: Scalable + Multiplicative> Scalable for RModuleAlgebra<S> {
    type Scalar = S::Value;

    /// `b[i] = factor * a[i]`.
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

impl<S: Random> Random for RModuleAlgebra<S> {
    fn random_using<R: Rng + ?Sized>(&self, rng: &mut R, a: &mut Self::Value) {
        let values = (0..a.len())
            .map(|_| {
                let mut v = self.scalar.construct();
                self.scalar.random_using(rng, &mut v);
                v
            })
            .collect();
        *a = self.values_like(a, values);
    }
}

impl<S: Additive + Multiplicative> RModuleAlgebra<S> {
    fn multiply_add(&self, sum: &mut S::Value, x: &S::Value, y: &S::Value) -> Result<()> {
        let mut prod = self.scalar.construct();
        self.scalar.multiply(x, y, &mut prod)?;
        self.scalar.add_assign(sum, &prod)
    }

    /// `x1 * y1 - x2 * y2`.
    fn cross_term(&self, x1: &S::Value, y1: &S::Value, x2: &S::Value, y2: &S::Value) -> Result<S::Value> {
        let (mut p, mut q, mut d) = (
            self.scalar.construct(),
            self.scalar.construct(),
            self.scalar.construct(),
        );
        self.scalar.multiply(x1, y1, &mut p)?;
        self.scalar.multiply(x2, y2, &mut q)?;
        self.scalar.subtract(&p, &q, &mut d)?;
        Ok(d)
    }

    /// `out = Σ a[i] * b[i]`, without conjugation.
    pub fn dot_product(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        out: &mut S::Value,
    ) -> Result<()> {
        require_len(b, a.len())?;
        let mut sum = self.scalar.construct();
        for (x, y) in a.iter().zip(b.iter()) {
            self.multiply_add(&mut sum, x, y)?;
        }
        *out = sum;
        Ok(())
    }

    /// Cross product of two vectors of length 3.
    pub fn cross_product(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        c: &mut RModuleMember<S::Value>,
    ) -> Result<()> {
        require_len(a, 3)?;
        require_len(b, 3)?;
        let (a0, a1, a2) = (a.get(0)?, a.get(1)?, a.get(2)?);
        let (b0, b1, b2) = (b.get(0)?, b.get(1)?, b.get(2)?);
        let values = alloc::vec![
            self.cross_term(a1, b2, a2, b1)?,
            self.cross_term(a2, b0, a0, b2)?,
            self.cross_term(a0, b1, a1, b0)?,
        ];
        *c = self.values_like(a, values);
        Ok(())
    }

    /// `a[0] * b[1] - a[1] * b[0]` for vectors of length 2.
    pub fn perp_dot_product(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        out: &mut S::Value,
    ) -> Result<()> {
        require_len(a, 2)?;
        require_len(b, 2)?;
        *out = self.cross_term(a.get(0)?, b.get(1)?, a.get(1)?, b.get(0)?)?;
        Ok(())
    }

    /// `out = a · (b × c)`.
    pub fn scalar_triple_product(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        c: &RModuleMember<S::Value>,
        out: &mut S::Value,
    ) -> Result<()> {
        let mut bc = self.construct();
        self.cross_product(b, c, &mut bc)?;
        self.dot_product(a, &bc, out)
    }

    /// `d = a × (b × c)`.
    pub fn vector_triple_product(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        c: &RModuleMember<S::Value>,
        d: &mut RModuleMember<S::Value>,
    ) -> Result<()> {
        let mut bc = self.construct();
        self.cross_product(b, c, &mut bc)?;
        self.cross_product(a, &bc, d)
    }

    /// `out[i][j] = a[i] * b[j]`.
    pub fn direct_product(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        out: &mut MatrixMember<S::Value>,
    ) -> Result<()> {
        let mut m = MatrixMember::zeroed(
            a.storage.construction(),
            a.len(),
            b.len(),
            self.scalar.construct(),
        );
        let mut prod = self.scalar.construct();
        for (i, x) in a.iter().enumerate() {
            for (j, y) in b.iter().enumerate() {
                self.scalar.multiply(x, y, &mut prod)?;
                m.set(i, j, &prod)?;
            }
        }
        *out = m;
        Ok(())
    }
}

impl<S: Additive + Multiplicative + Conjugate> RModuleAlgebra<S> {
    /// Hermitian inner product `Σ conj(a[i]) * b[i]`.
    pub fn inner_product(
        &self,
        a: &RModuleMember<S::Value>,
        b: &RModuleMember<S::Value>,
        out: &mut S::Value,
    ) -> Result<()> {
        require_len(b, a.len())?;
        let mut sum = self.scalar.construct();
        let mut conj = self.scalar.construct();
        for (x, y) in a.iter().zip(b.iter()) {
            self.scalar.conjugate(x, &mut conj)?;
            self.multiply_add(&mut sum, &conj, y)?;
        }
        *out = sum;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::str::FromStr;

    use octalg_octonion::{OctonionAlgebra, OctonionValue};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    type Vector = RModuleMember<OctonionValue>;

    fn alg() -> RModuleAlgebra<OctonionAlgebra> {
        RModuleAlgebra::new(OctonionAlgebra::new())
    }

    fn vector(s: &str) -> Vector {
        alg().construct_from_str(s).unwrap()
    }

    fn oct(s: &str) -> OctonionValue {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() -> anyhow::Result<()> {
        let v = vector("[{1,2},3,{0,0,0,0,0,0,0,-1}]");
        assert_eq!(v.len(), 3);
        assert_eq!(v.get(1)?, &oct("3"));
        assert_eq!(v.to_string(), "[{1,2,0,0,0,0,0,0},{3,0,0,0,0,0,0,0},{0,0,0,0,0,0,0,-1}]");
        assert_eq!(alg().construct_from_str(&v.to_string())?, v);
        assert!(alg().construct_from_str("[[1][2]]").is_err());
        assert!(alg().construct_from_str("[1,{x}]").is_err());
        Ok(())
    }

    #[test]
    fn arithmetic_checks_lengths() -> anyhow::Result<()> {
        let alg = alg();
        let a = vector("[1,2,3]");
        let b = vector("[{0,1},{0,1},{0,1}]");
        let mut c = alg.construct();
        alg.add(&a, &b, &mut c)?;
        assert_eq!(c, vector("[{1,1},{2,1},{3,1}]"));

        let short = vector("[1,2]");
        let before = c.clone();
        assert!(matches!(
            alg.add(&a, &short, &mut c),
            Err(AlgebraError::ShapeMismatch { .. })
        ));
        assert_eq!(c, before);

        alg.negate_assign(&mut c)?;
        assert_eq!(c, vector("[{-1,-1},{-2,-1},{-3,-1}]"));
        Ok(())
    }

    #[test]
    fn dot_and_inner_products() -> anyhow::Result<()> {
        let alg = alg();
        let v = vector("[{0,1},{2,0,1}]");
        let (mut dot, mut inner) = (OctonionValue::default(), OctonionValue::default());
        alg.dot_product(&v, &v, &mut dot)?;
        // i*i + (2+j)(2+j) = -1 + 3 + 4j
        assert_eq!(dot, oct("{2,0,4}"));
        alg.inner_product(&v, &v, &mut inner)?;
        // conj(i) i + conj(2+j)(2+j) = 1 + 5
        assert_eq!(inner, oct("6"));
        assert!(alg.dot_product(&v, &vector("[1]"), &mut dot).is_err());
        Ok(())
    }

    #[test]
    fn cross_and_triple_products() -> anyhow::Result<()> {
        let alg = alg();
        let x = vector("[1,0,0]");
        let y = vector("[0,1,0]");
        let z = vector("[0,0,1]");
        let mut c = alg.construct();
        alg.cross_product(&x, &y, &mut c)?;
        assert_eq!(c, z);

        let mut s = OctonionValue::default();
        alg.scalar_triple_product(&x, &y, &z, &mut s)?;
        assert_eq!(s, oct("1"));

        // x × (x × y) = -y
        alg.vector_triple_product(&x, &x, &y, &mut c)?;
        assert_eq!(c, vector("[0,-1,0]"));

        let mut p = OctonionValue::default();
        alg.perp_dot_product(&vector("[3,1]"), &vector("[2,5]"), &mut p)?;
        assert_eq!(p, oct("13"));
        assert!(alg.cross_product(&vector("[1,2]"), &y, &mut c).is_err());
        Ok(())
    }

    #[test]
    fn norms_and_scaling() -> anyhow::Result<()> {
        let alg = alg();
        let v = vector("[{3},{0,4}]");
        let mut n = BigDecimal::default();
        alg.norm(&v, &mut n)?;
        assert_eq!(n, BigDecimal::from(5));

        let mut out = alg.construct();
        alg.scale(&oct("{0,1}"), &v, &mut out)?;
        assert_eq!(out, vector("[{0,3},-4]"));
        alg.scale_by_one_half(1, &v, &mut out)?;
        assert_eq!(out, vector("[1.5,{0,2}]"));

        let mut conj = alg.construct();
        alg.conjugate(&v, &mut conj)?;
        assert_eq!(conj, vector("[3,{0,-4}]"));

        let tol = BigDecimal::from_str("0.6").unwrap();
        assert!(alg.within(&tol, &vector("[1,2]"), &vector("[1.5,2]"))?);
        assert!(!alg.within(&tol, &vector("[1,2]"), &vector("[1,2,3]"))?);
        Ok(())
    }

    #[test]
    fn direct_product_shape() -> anyhow::Result<()> {
        let alg = alg();
        let mut m = MatrixMember::zeroed(StorageConstruction::MemArray, 0, 0, OctonionValue::default());
        alg.direct_product(&vector("[1,2]"), &vector("[{0,1},3,4]"), &mut m)?;
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.get(1, 0)?, &oct("{0,2}"));
        assert_eq!(m.get(1, 2)?, &oct("8"));
        Ok(())
    }

    #[test]
    fn allocation_and_primitives() -> anyhow::Result<()> {
        let alg = alg();
        let mut v = alg.construct_with(StorageConstruction::MemSparse, 2);
        assert_eq!(v.thread_access(), ThreadAccess::Confined);
        v.set(1, &oct("{1,2}"))?;
        alg.alloc(&mut v, 2);
        assert_eq!(v.get(1)?, &oct("{1,2}"));
        alg.alloc(&mut v, 3);
        assert!(alg.is_zero(&v));

        let doubles: Vec<f64> = (0..24).map(|n| n as f64 * 0.5).collect();
        v.set_from_doubles(&doubles)?;
        assert_eq!(v.get_as_double_array(), doubles);
        assert_eq!(v.get(2)?.r(), &BigDecimal::from(8));
        assert!(v.set_from_doubles(&doubles[1..]).is_err());

        let mut rng = StdRng::seed_from_u64(1);
        alg.random_using(&mut rng, &mut v);
        assert_eq!(v.len(), 3);
        assert!(!alg.is_zero(&v));
        assert_eq!(v.thread_access(), ThreadAccess::Confined);
        Ok(())
    }

    #[test]
    fn init_zeroes_and_keeps_storage_kind() -> anyhow::Result<()> {
        let alg = alg();
        let mut v = alg.construct_with(StorageConstruction::MemSparse, 3);
        v.set(0, &oct("5"))?;
        alg.init(&mut v, 3);
        assert!(alg.is_zero(&v));
        alg.init(&mut v, 4);
        assert_eq!(v.len(), 4);
        assert_eq!(v.thread_access(), ThreadAccess::Confined);

        let a = alg.construct_with(StorageConstruction::MemSparse, 3);
        let mut b = vector("[1,0,0]");
        b.set(1, &oct("2"))?;
        let mut c = alg.construct();
        alg.cross_product(&a, &b, &mut c)?;
        assert_eq!(c.thread_access(), ThreadAccess::Confined);
        assert!(alg.is_zero(&c));
        Ok(())
    }
}
