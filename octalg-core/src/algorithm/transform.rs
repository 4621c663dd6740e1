use alloc::vec::Vec;

use crate::{
    error::{AlgebraError, Result},
    storage::IndexedStorage,
};

fn check_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.windows(2).any(|w| w[0] != w[1]) {
        return Err(AlgebraError::shape_mismatch(&sizes[..1], &sizes[1..]));
    }
    Ok(())
}

/// Writes `op(a[i]) -> b[i]` for every offset.
///
/// All results are computed before `b` is written, so a failing element
/// leaves `b` unchanged.
pub fn transform2<U, W, SA, SB, F>(a: &SA, b: &mut SB, mut op: F) -> Result<()>
where
    W: Clone,
    SA: IndexedStorage<U>,
    SB: IndexedStorage<W>,
    F: FnMut(&U, &mut W) -> Result<()>,
{
    check_sizes(&[a.size(), b.size()])?;
    let mut results = Vec::with_capacity(a.size());
    for i in 0..a.size() {
        let mut out = b.get(i)?.clone();
        op(a.get(i)?, &mut out)?;
        results.push(out);
    }
    for (i, v) in results.iter().enumerate() {
        b.set(i, v)?;
    }
    Ok(())
}

/// Writes `op(a[i], b[i]) -> c[i]` for every offset.
pub fn transform3<U, X, W, SA, SB, SC, F>(a: &SA, b: &SB, c: &mut SC, mut op: F) -> Result<()>
where
    W: Clone,
    SA: IndexedStorage<U>,
    SB: IndexedStorage<X>,
    SC: IndexedStorage<W>,
    F: FnMut(&U, &X, &mut W) -> Result<()>,
{
    check_sizes(&[a.size(), b.size(), c.size()])?;
    let mut results = Vec::with_capacity(a.size());
    for i in 0..a.size() {
        let mut out = c.get(i)?.clone();
        op(a.get(i)?, b.get(i)?, &mut out)?;
        results.push(out);
    }
    for (i, v) in results.iter().enumerate() {
        c.set(i, v)?;
    }
    Ok(())
}

/// Writes `op(fixed, a[i]) -> b[i]` for every offset.
pub fn fixed_transform2<X, U, W, SA, SB, F>(fixed: &X, a: &SA, b: &mut SB, mut op: F) -> Result<()>
where
    X: ?Sized,
    W: Clone,
    SA: IndexedStorage<U>,
    SB: IndexedStorage<W>,
    F: FnMut(&X, &U, &mut W) -> Result<()>,
{
    transform2(a, b, |x, y| op(fixed, x, y))
}
