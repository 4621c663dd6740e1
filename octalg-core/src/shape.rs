use alloc::{vec, vec::Vec};

use crate::error::{AlgebraError, Result};

/// Row-major strides: the last axis varies fastest.
pub fn multipliers(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for axis in (0..dims.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * dims[axis + 1];
    }
    strides
}

/// Number of elements of a shape; a rank-0 shape holds one.
pub fn element_count(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Linear offset of `index`, bounds-checked against `dims`.
pub fn offset_of(dims: &[usize], multipliers: &[usize], index: &[usize]) -> Result<usize> {
    if index.len() != dims.len() {
        return Err(AlgebraError::invalid(alloc::format!(
            "index of rank {} used on shape of rank {}",
            index.len(),
            dims.len()
        )));
    }
    let mut offset = 0;
    for ((&i, &d), &m) in index.iter().zip(dims).zip(multipliers) {
        if i >= d {
            return Err(AlgebraError::out_of_bounds(i, d));
        }
        offset += i * m;
    }
    Ok(offset)
}

/// Inverse of [`offset_of`].
pub fn index_of(multipliers: &[usize], mut offset: usize) -> Vec<usize> {
    multipliers
        .iter()
        .map(|&m| {
            let i = offset / m;
            offset %= m;
            i
        })
        .collect()
}

/// Row-major walk over every index of a shape.
#[derive(Debug, Clone)]
pub struct IndexIter {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl IndexIter {
    /// Starts at the all-zero index; empty when any extent is zero.
    pub fn new(dims: &[usize]) -> Self {
        let next = if dims.contains(&0) {
            None
        } else {
            Some(vec![0; dims.len()])
        };
        IndexIter {
            dims: dims.to_vec(),
            next,
        }
    }
}

impl Iterator for IndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut succ = current.clone();
        for axis in (0..succ.len()).rev() {
            succ[axis] += 1;
            if succ[axis] < self.dims[axis] {
                self.next = Some(succ);
                return Some(current);
            }
            succ[axis] = 0;
        }
        Some(current)
    }
}
