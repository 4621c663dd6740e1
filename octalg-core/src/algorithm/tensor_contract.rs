use alloc::vec::Vec;

use tracing::debug;

use crate::{
    algebra::Additive,
    error::{AlgebraError, Result},
    shape::{IndexIter, element_count, multipliers, offset_of},
    storage::IndexedStorage,
};

/// Sums `a` over the diagonal of axes `i` and `j`.
///
/// `dims` is the shape of `a`; `out` must hold the element count of `dims`
/// with axes `i` and `j` removed, laid out row-major.
pub fn tensor_contract<A, S>(
    alg: &A,
    dims: &[usize],
    i: usize,
    j: usize,
    a: &S,
    out: &mut S,
) -> Result<()>
where
    A: Additive,
    S: IndexedStorage<A::Value>,
{
    let rank = dims.len();
    if i >= rank {
        return Err(AlgebraError::out_of_bounds(i, rank));
    }
    if j >= rank {
        return Err(AlgebraError::out_of_bounds(j, rank));
    }
    if i == j {
        return Err(AlgebraError::invalid("contraction needs two distinct axes"));
    }
    if dims[i] != dims[j] {
        return Err(AlgebraError::shape_mismatch(&dims[i..=i], &dims[j..=j]));
    }
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let reduced: Vec<usize> = dims
        .iter()
        .enumerate()
        .filter(|&(axis, _)| axis != lo && axis != hi)
        .map(|(_, &d)| d)
        .collect();
    let expected = element_count(&reduced);
    if out.size() != expected {
        return Err(AlgebraError::SizeMismatch {
            expected,
            actual: out.size(),
        });
    }
    debug!(?dims, i, j, "contract");

    let strides = multipliers(dims);
    let mut full = Vec::with_capacity(rank);
    for (offset, idx) in IndexIter::new(&reduced).enumerate() {
        let mut sum = alg.construct();
        for k in 0..dims[i] {
            full.clear();
            full.extend_from_slice(&idx[..lo]);
            full.push(k);
            full.extend_from_slice(&idx[lo..hi - 1]);
            full.push(k);
            full.extend_from_slice(&idx[hi - 1..]);
            alg.add_assign(&mut sum, a.get(offset_of(dims, &strides, &full)?)?)?;
        }
        out.set(offset, &sum)?;
    }
    Ok(())
}
