use tracing::debug;

use crate::{
    algebra::Multiplicative,
    error::{AlgebraError, Result},
    storage::IndexedStorage,
};

/// `c[ia ++ ib] = a[ia] * b[ib]` over row-major storages.
///
/// With row-major layout the concatenated index of `(ia, ib)` lives at offset
/// `ia * b.size() + ib`. `c` must already hold `a.size() * b.size()` slots.
pub fn tensor_outer_product<A, SA, SB, SC>(alg: &A, a: &SA, b: &SB, c: &mut SC) -> Result<()>
where
    A: Multiplicative,
    SA: IndexedStorage<A::Value>,
    SB: IndexedStorage<A::Value>,
    SC: IndexedStorage<A::Value>,
{
    let (na, nb) = (a.size(), b.size());
    if c.size() != na * nb {
        return Err(AlgebraError::SizeMismatch {
            expected: na * nb,
            actual: c.size(),
        });
    }
    debug!(na, nb, "outer product");
    let mut prod = alg.construct();
    for ia in 0..na {
        let x = a.get(ia)?;
        for ib in 0..nb {
            alg.multiply(x, b.get(ib)?, &mut prod)?;
            c.set(ia * nb + ib, &prod)?;
        }
    }
    Ok(())
}
