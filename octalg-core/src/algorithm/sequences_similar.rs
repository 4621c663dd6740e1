use bigdecimal::BigDecimal;

use crate::{algebra::Tolerance, error::Result, storage::IndexedStorage};

/// Whether two sequences have the same length and agree element-wise within `tol`.
pub fn sequences_similar<A, S>(alg: &A, tol: &BigDecimal, a: &S, b: &S) -> Result<bool>
where
    A: Tolerance,
    S: IndexedStorage<A::Value>,
{
    if a.size() != b.size() {
        return Ok(false);
    }
    for i in 0..a.size() {
        if !alg.within(tol, a.get(i)?, b.get(i)?)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{storage::Storage, testing::IntAlgebra};

    #[test]
    fn similarity_respects_tolerance_and_length() -> anyhow::Result<()> {
        let a = Storage::from_values(vec![1, 5, 9], 0);
        let b = Storage::from_values(vec![2, 4, 9], 0);
        assert!(sequences_similar(&IntAlgebra, &BigDecimal::from(1), &a, &b)?);
        assert!(!sequences_similar(&IntAlgebra, &BigDecimal::from(0), &a, &b)?);
        let c = Storage::from_values(vec![1, 5], 0);
        assert!(!sequences_similar(&IntAlgebra, &BigDecimal::from(10), &a, &c)?);
        Ok(())
    }
}
