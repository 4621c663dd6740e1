use alloc::vec::Vec;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use tracing::debug;

use crate::{
    algebra::{Additive, Scalable},
    error::{AlgebraError, Result},
    shape::{element_count, multipliers},
    storage::IndexedStorage,
};

fn to_rational(x: &BigDecimal) -> BigRational {
    let (digits, exponent) = x.as_bigint_and_exponent();
    let ten = BigInt::from(10);
    if exponent >= 0 {
        BigRational::new(digits, ten.pow(exponent.unsigned_abs() as u32))
    } else {
        BigRational::from_integer(digits * ten.pow(exponent.unsigned_abs() as u32))
    }
}

/// Derivative of `a` along `axis` for samples `spacing` apart.
///
/// Interior points take the central difference `(a[k+1] - a[k-1]) / 2h`,
/// the first and last point the forward and backward difference. An axis of
/// extent one has a zero derivative. `out` has the shape of `a`.
pub fn finite_difference<A, SA, SB>(
    alg: &A,
    dims: &[usize],
    axis: usize,
    spacing: &BigDecimal,
    a: &SA,
    out: &mut SB,
) -> Result<()>
where
    A: Additive + Scalable,
    SA: IndexedStorage<A::Value>,
    SB: IndexedStorage<A::Value>,
{
    if axis >= dims.len() {
        return Err(AlgebraError::out_of_bounds(axis, dims.len()));
    }
    if spacing.is_zero() {
        return Err(AlgebraError::invalid("finite difference spacing must be nonzero"));
    }
    let count = element_count(dims);
    for size in [a.size(), out.size()] {
        if size != count {
            return Err(AlgebraError::SizeMismatch {
                expected: count,
                actual: size,
            });
        }
    }
    debug!(?dims, axis, %spacing, "finite difference");

    let n = dims[axis];
    let stride = multipliers(dims)[axis];
    let one_sided = to_rational(spacing).recip();
    let central = one_sided.clone() / BigInt::from(2);
    let mut diff = alg.construct();
    let mut results = Vec::with_capacity(count);
    for offset in 0..count {
        let mut d = alg.construct();
        if n > 1 {
            let k = (offset / stride) % n;
            let (lo, hi, factor) = if k == 0 {
                (offset, offset + stride, &one_sided)
            } else if k == n - 1 {
                (offset - stride, offset, &one_sided)
            } else {
                (offset - stride, offset + stride, &central)
            };
            alg.subtract(a.get(hi)?, a.get(lo)?, &mut diff)?;
            alg.scale_by_rational(factor, &diff, &mut d)?;
        }
        results.push(d);
    }
    for (i, v) in results.iter().enumerate() {
        out.set(i, v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::str::FromStr;

    use super::*;
    use crate::{storage::Storage, testing::IntAlgebra};

    #[test]
    fn squares_along_one_axis() -> anyhow::Result<()> {
        let a = Storage::from_values(vec![0, 1, 4, 9, 16], 0);
        let mut out = Storage::from_values(vec![0; 5], 0);
        finite_difference(&IntAlgebra, &[5], 0, &BigDecimal::from(1), &a, &mut out)?;
        assert_eq!(out, Storage::from_values(vec![1, 2, 4, 6, 7], 0));

        let half = BigDecimal::from_str("0.5").unwrap();
        finite_difference(&IntAlgebra, &[5], 0, &half, &a, &mut out)?;
        assert_eq!(out, Storage::from_values(vec![2, 4, 8, 12, 14], 0));
        Ok(())
    }

    #[test]
    fn inner_axis_of_matrix() -> anyhow::Result<()> {
        // rows [0,2,4] and [1,1,1]
        let a = Storage::from_values(vec![0, 2, 4, 1, 1, 1], 0);
        let mut out = Storage::from_values(vec![0; 6], 0);
        finite_difference(&IntAlgebra, &[2, 3], 1, &BigDecimal::from(1), &a, &mut out)?;
        assert_eq!(out, Storage::from_values(vec![2, 2, 2, 0, 0, 0], 0));
        finite_difference(&IntAlgebra, &[2, 3], 0, &BigDecimal::from(1), &a, &mut out)?;
        assert_eq!(out, Storage::from_values(vec![1, -1, -3, 1, -1, -3], 0));
        Ok(())
    }

    #[test]
    fn degenerate_inputs() -> anyhow::Result<()> {
        let a = Storage::from_values(vec![7], 0);
        let mut out = Storage::from_values(vec![3], 0);
        finite_difference(&IntAlgebra, &[1], 0, &BigDecimal::from(1), &a, &mut out)?;
        assert_eq!(*out.get(0)?, 0);
        assert!(matches!(
            finite_difference(&IntAlgebra, &[1], 1, &BigDecimal::from(1), &a, &mut out),
            Err(AlgebraError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            finite_difference(&IntAlgebra, &[1], 0, &BigDecimal::zero(), &a, &mut out),
            Err(AlgebraError::InvalidArgument(_))
        ));
        Ok(())
    }
}
