//! Cartesian tensors: every axis has the same extent, the dimension count,
//! and there is no distinction between upper and lower indices.
//!
//! A tensor of rank `r` and dimension count `d` holds `d^r` elements in
//! row-major order; a rank-0 tensor holds a single element.

use alloc::{format, vec, vec::Vec};
use core::fmt;

use bigdecimal::BigDecimal;
use num_rational::BigRational;
use octalg_core::{
    algebra::{
        Additive, Algebra, Conjugate, HighPrecision, Invertible, Multiplicative, Normed, Random,
        Scalable, Tolerance,
    },
    algorithm::{
        fixed_transform2, sequences_similar, tensor_contract, tensor_outer_product, transform2,
        transform3,
    },
    error::{AlgebraError, Result},
    primitive::{DecimalComponents, Primitive, PrimitiveArrays, check_len, fill, flatten},
    shape::multipliers,
    storage::{IndexedStorage, Storage, StorageConstruction, ThreadAccess},
    text::{parse_shaped, write_nested},
};
use octalg_decimal::MathContext;
use rand::Rng;
use tracing::debug;

/// A Cartesian tensor: `rank` indices, each ranging over `dim_count` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorMember<V: Clone> {
    rank: usize,
    dim_count: usize,
    multipliers: Vec<usize>,
    storage: Storage<V>,
}

impl<V: Clone> TensorMember<V> {
    fn with_storage(rank: usize, dim_count: usize, storage: Storage<V>) -> Self {
        // a scalar has no axes to carry an extent
        let dim_count = if rank == 0 { 0 } else { dim_count };
        TensorMember {
            rank,
            dim_count,
            multipliers: multipliers(&vec![dim_count; rank]),
            storage,
        }
    }

    /// A tensor of `rank` axes of extent `dim_count`, every element `zero`.
    pub fn zeroed(construction: StorageConstruction, rank: usize, dim_count: usize, zero: V) -> Self {
        let size = element_count(rank, dim_count);
        Self::with_storage(rank, dim_count, Storage::allocate(construction, size, zero))
    }

    /// Number of indices.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Extent shared by every axis; zero for rank 0.
    pub fn dim_count(&self) -> usize {
        self.dim_count
    }

    /// Extent of every index.
    pub fn dims(&self) -> Vec<usize> {
        vec![self.dim_count; self.rank]
    }

    /// Storage stride of each index.
    pub fn multipliers(&self) -> &[usize] {
        &self.multipliers
    }

    /// Number of stored elements.
    pub fn element_count(&self) -> usize {
        self.storage.size()
    }

    fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.rank {
            return Err(AlgebraError::invalid(format!(
                "index of rank {} used on tensor of rank {}",
                index.len(),
                self.rank
            )));
        }
        let mut offset = 0;
        for (&i, &m) in index.iter().zip(&self.multipliers) {
            if i >= self.dim_count {
                return Err(AlgebraError::out_of_bounds(i, self.dim_count));
            }
            offset += i * m;
        }
        Ok(offset)
    }

    /// Element at `index`.
    pub fn get(&self, index: &[usize]) -> Result<&V> {
        self.storage.get(self.offset(index)?)
    }

    /// Overwrites the element at `index`.
    pub fn set(&mut self, index: &[usize], value: &V) -> Result<()> {
        let offset = self.offset(index)?;
        self.storage.set(offset, value)
    }

    /// Backing storage.
    pub fn storage(&self) -> &Storage<V> {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut Storage<V> {
        &mut self.storage
    }

    /// Access mode of the backing storage.
    pub fn thread_access(&self) -> ThreadAccess {
        self.storage.thread_access()
    }

    pub(crate) fn same_shape(&self, other: &Self) -> Result<()> {
        if self.rank != other.rank || self.dim_count != other.dim_count {
            return Err(AlgebraError::shape_mismatch(&self.dims(), &other.dims()));
        }
        Ok(())
    }
}

fn element_count(rank: usize, dim_count: usize) -> usize {
    (0..rank).map(|_| dim_count).product()
}

impl<V: Clone + fmt::Display> fmt::Display for TensorMember<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, &self.dims(), |w, i| match self.storage.get(i) {
            Ok(v) => write!(w, "{v}"),
            Err(_) => Err(fmt::Error),
        })
    }
}

impl<V: Clone + DecimalComponents> PrimitiveArrays for TensorMember<V> {
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

/// Cartesian tensor operations built from the operations of the scalar
/// algebra `S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TensorAlgebra<S> {
    scalar: S,
}

impl<S: Algebra> TensorAlgebra<S> {
    /// Tensors over `scalar`.
    pub fn new(scalar: S) -> Self {
        TensorAlgebra { scalar }
    }

    /// The element algebra.
    pub fn scalar(&self) -> &S {
        &self.scalar
    }

    /// A zero tensor of the given shape in storage of kind `construction`.
    pub fn construct_with(
        &self,
        construction: StorageConstruction,
        rank: usize,
        dim_count: usize,
    ) -> TensorMember<S::Value> {
        TensorMember::zeroed(construction, rank, dim_count, self.scalar.construct())
    }

    /// Tensor holding `values` in row-major order.
    pub fn construct_from_values(
        &self,
        rank: usize,
        dim_count: usize,
        values: Vec<S::Value>,
    ) -> Result<TensorMember<S::Value>> {
        check_len(element_count(rank, dim_count), values.len())?;
        Ok(TensorMember::with_storage(
            rank,
            dim_count,
            Storage::from_values(values, self.scalar.construct()),
        ))
    }

    /// Resizes `a` to zeros of the given shape unless it already has it.
    pub fn alloc(&self, a: &mut TensorMember<S::Value>, rank: usize, dim_count: usize) {
        let dim_count = if rank == 0 { 0 } else { dim_count };
        if a.rank != rank || a.dim_count != dim_count {
            a.storage.reallocate(element_count(rank, dim_count));
            a.rank = rank;
            a.dim_count = dim_count;
            a.multipliers = multipliers(&vec![dim_count; rank]);
        }
    }

    /// Reshapes `a` to `rank` axes of extent `dim_count` and zeroes every
    /// element, keeping its storage kind.
    pub fn init(&self, a: &mut TensorMember<S::Value>, rank: usize, dim_count: usize) {
        self.alloc(a, rank, dim_count);
        a.storage.fill_zero();
    }

    pub(crate) fn like(&self, a: &TensorMember<S::Value>, rank: usize, dim_count: usize) -> TensorMember<S::Value> {
        self.construct_with(a.storage.construction(), rank, dim_count)
    }

    fn zip_with<F>(
        &self,
        a: &TensorMember<S::Value>,
        b: &TensorMember<S::Value>,
        c: &mut TensorMember<S::Value>,
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

    fn map_with<F>(&self, a: &TensorMember<S::Value>, b: &mut TensorMember<S::Value>, op: F) -> Result<()>
    where
        F: FnMut(&S::Value, &mut S::Value) -> Result<()>,
    {
        let mut out = a.clone();
        transform2(&a.storage, &mut out.storage, op)?;
        *b = out;
        Ok(())
    }

    /// Sums the diagonal of axes `i` and `j`; the result has rank
    /// `rank(a) - 2` and the dimension count of `a`.
    pub fn contract(
        &self,
        i: usize,
        j: usize,
        a: &TensorMember<S::Value>,
        b: &mut TensorMember<S::Value>,
    ) -> Result<()>
    where
        S: Additive,
    {
        let rank = a.rank.saturating_sub(2);
        let mut out = self.like(a, rank, a.dim_count);
        tensor_contract(&self.scalar, &a.dims(), i, j, &a.storage, &mut out.storage)?;
        *b = out;
        Ok(())
    }

    /// Cartesian tensors have no upper indices.
    pub fn raise_index(
        &self,
        _index: usize,
        _a: &TensorMember<S::Value>,
        _b: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        Err(AlgebraError::unsupported(
            "Cartesian tensor",
            "raising an index",
        ))
    }

    /// A copy: upper and lower indices coincide.
    pub fn lower_index(
        &self,
        index: usize,
        a: &TensorMember<S::Value>,
        b: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        if index >= a.rank {
            return Err(AlgebraError::out_of_bounds(index, a.rank));
        }
        self.assign(a, b);
        Ok(())
    }
}

impl<S: Multiplicative> TensorAlgebra<S> {
    /// `c[ia ++ ib] = a[ia] * b[ib]`.
    ///
    /// Dimension counts must agree unless one operand has rank 0.
    pub fn outer_product(
        &self,
        a: &TensorMember<S::Value>,
        b: &TensorMember<S::Value>,
        c: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        let dim_count = match (a.rank, b.rank) {
            (0, _) => b.dim_count,
            (_, 0) => a.dim_count,
            _ if a.dim_count == b.dim_count => a.dim_count,
            _ => return Err(AlgebraError::shape_mismatch(&a.dims(), &b.dims())),
        };
        debug!(left = a.rank, right = b.rank, dim_count, "tensor outer product");
        let mut out = self.like(a, a.rank + b.rank, dim_count);
        tensor_outer_product(&self.scalar, &a.storage, &b.storage, &mut out.storage)?;
        *c = out;
        Ok(())
    }

    /// Elementwise `c[i] = a[i] * b[i]`, keeping `a` on the left.
    pub fn multiply_elements(
        &self,
        a: &TensorMember<S::Value>,
        b: &TensorMember<S::Value>,
        c: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        self.zip_with(a, b, c, |x, y, z| self.scalar.multiply(x, y, z))
    }
}

impl<S: Additive + Multiplicative> TensorAlgebra<S> {
    /// Outer product followed by contraction of axis `ai` of `a` with axis
    /// `bi` of `b`.
    pub fn inner_product(
        &self,
        ai: usize,
        bi: usize,
        a: &TensorMember<S::Value>,
        b: &TensorMember<S::Value>,
        c: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        if ai >= a.rank {
            return Err(AlgebraError::out_of_bounds(ai, a.rank));
        }
        if bi >= b.rank {
            return Err(AlgebraError::out_of_bounds(bi, b.rank));
        }
        let mut outer = self.construct();
        self.outer_product(a, b, &mut outer)?;
        self.contract(ai, a.rank + bi, &outer, c)
    }
}

impl<S: Invertible> TensorAlgebra<S> {
    /// Elementwise `c[i] = a[i] / b[i]`.
    pub fn divide_elements(
        &self,
        a: &TensorMember<S::Value>,
        b: &TensorMember<S::Value>,
        c: &mut TensorMember<S::Value>,
    ) -> Result<()> {
        self.zip_with(a, b, c, |x, y, z| self.scalar.divide(x, y, z))
    }
}

impl<S: Algebra> Algebra for TensorAlgebra<S> {
    type Value = TensorMember<S::Value>;

    fn type_name(&self) -> &'static str {
        "tensor"
    }

    /// A rank-0 zero.
    fn construct(&self) -> Self::Value {
        self.construct_with(StorageConstruction::MemArray, 0, 0)
    }

    /// Parses nested brackets; every axis must have the same extent.
    fn construct_from_str(&self, s: &str) -> Result<Self::Value> {
        let (dims, leaves) = parse_shaped(s)?;
        let dim_count = dims.first().copied().unwrap_or(0);
        if dims.iter().any(|&d| d != dim_count) {
            debug!(?dims, "unequal tensor extents");
            return Err(AlgebraError::invalid(format!(
                "Cartesian tensor needs equal extents, found {dims:?}"
            )));
        }
        let values = leaves
            .iter()
            .map(|leaf| self.scalar.construct_from_str(leaf))
            .collect::<Result<Vec<_>>>()?;
        self.construct_from_values(dims.len(), dim_count, values)
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

impl<S: Additive> Additive for TensorAlgebra<S> {
    /// Shapes must match exactly.
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

impl<S: Multiplicative> Multiplicative for TensorAlgebra<S> {
    /// The outer product.
    fn multiply(&self, a: &Self::Value, b: &Self::Value, c: &mut Self::Value) -> Result<()> {
        self.outer_product(a, b, c)
    }

    /// The rank-0 one, the unit of the outer product.
    fn unity(&self, a: &mut Self::Value) -> Result<()> {
        let mut one = self.scalar.construct();
        self.scalar.unity(&mut one)?;
        let mut out = self.like(a, 0, 0);
        out.storage.set(0, &one)?;
        *a = out;
        Ok(())
    }

    fn is_unity(&self, a: &Self::Value) -> bool {
        a.rank == 0 && a.storage.get(0).is_ok_and(|x| self.scalar.is_unity(x))
    }
}

impl<S: Conjugate> Conjugate for TensorAlgebra<S> {
    fn conjugate(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        self.map_with(a, b, |x, y| self.scalar.conjugate(x, y))
    }
}

impl<S: HighPrecision> HighPrecision for TensorAlgebra<S> {
    fn math_context(&self) -> &MathContext {
        self.scalar.math_context()
    }
}

impl<S: Normed + HighPrecision> Normed for TensorAlgebra<S> {
    /// Frobenius norm over all elements.
    fn norm(&self, a: &Self::Value, out: &mut BigDecimal) -> Result<()> {
        let mut sum = BigDecimal::default();
        let mut n = BigDecimal::default();
        for x in a.storage.iter() {
            self.scalar.norm(x, &mut n)?;
            sum += n.square();
        }
        *out = self.scalar.math_context().sqrt(&sum)?;
        Ok(())
    }
}

impl<S: Tolerance> Tolerance for TensorAlgebra<S> {
    fn within(&self, tol: &BigDecimal, a: &Self::Value, b: &Self::Value) -> Result<bool> {
        if a.same_shape(b).is_err() {
            return Ok(false);
        }
        sequences_similar(&self.scalar, tol, &a.storage, &b.storage)
    }
}

impl<S: Scalable + Multiplicative> Scalable for TensorAlgebra<S> {
    type Scalar = S::Value;

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

impl<S: Random> Random for TensorAlgebra<S> {
    fn random_using<R: Rng + ?Sized>(&self, rng: &mut R, a: &mut Self::Value) {
        let values = (0..a.storage.size())
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
