use crate::error::Result;

/// Applies `step` to `a` `times` times and stores the result in `b`.
pub fn repeat<V, F>(times: u32, a: &V, b: &mut V, mut step: F) -> Result<()>
where
    V: Clone,
    F: FnMut(&V, &mut V) -> Result<()>,
{
    let mut acc = a.clone();
    for _ in 0..times {
        let prev = acc.clone();
        step(&prev, &mut acc)?;
    }
    b.clone_from(&acc);
    Ok(())
}
