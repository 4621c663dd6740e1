use alloc::{collections::BTreeMap, vec, vec::Vec};

use tracing::trace;

use crate::error::{AlgebraError, Result};

/// Backing layout chosen when a container is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StorageConstruction {
    /// Dense [`ArrayStorage`].
    #[default]
    MemArray,
    /// Sparse [`SparseStorage`].
    MemSparse,
}

/// Which threads may touch a storage concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadAccess {
    /// Shareable across threads.
    Any,
    /// Accessed by one thread at a time.
    Confined,
}

/// Linearly addressed, resizable sequence of values.
pub trait IndexedStorage<V>: Clone {
    /// Number of slots.
    fn size(&self) -> usize;

    /// The value at `index`.
    fn get(&self, index: usize) -> Result<&V>;

    /// Overwrites the value at `index`.
    fn set(&mut self, index: usize, value: &V) -> Result<()>;

    /// An independent deep copy.
    fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Replaces the contents with `size` zero values.
    fn reallocate(&mut self, size: usize);

    /// Sets every slot to zero, keeping the size.
    fn fill_zero(&mut self);

    /// Threading constraint of this layout.
    fn thread_access(&self) -> ThreadAccess;
}

/// Dense storage.
#[derive(Debug, Clone)]
pub struct ArrayStorage<V> {
    data: Vec<V>,
    zero: V,
}

impl<V: Clone> ArrayStorage<V> {
    /// `size` zero values.
    pub fn new(size: usize, zero: V) -> Self {
        ArrayStorage {
            data: vec![zero.clone(); size],
            zero,
        }
    }

    /// Storage over `data`.
    pub fn from_values(data: Vec<V>, zero: V) -> Self {
        ArrayStorage { data, zero }
    }

    /// The values in order.
    pub fn as_slice(&self) -> &[V] {
        &self.data
    }
}

impl<V: Clone> IndexedStorage<V> for ArrayStorage<V> {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn get(&self, index: usize) -> Result<&V> {
        self.data
            .get(index)
            .ok_or_else(|| AlgebraError::out_of_bounds(index, self.data.len()))
    }

    fn set(&mut self, index: usize, value: &V) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or_else(|| AlgebraError::out_of_bounds(index, len))?;
        slot.clone_from(value);
        Ok(())
    }

    fn reallocate(&mut self, size: usize) {
        trace!(from = self.data.len(), to = size, "reallocate array storage");
        self.data = vec![self.zero.clone(); size];
    }

    fn fill_zero(&mut self) {
        for slot in self.data.iter_mut() {
            slot.clone_from(&self.zero);
        }
    }

    fn thread_access(&self) -> ThreadAccess {
        ThreadAccess::Any
    }
}

/// Storage that only keeps explicitly written slots.
#[derive(Debug, Clone)]
pub struct SparseStorage<V> {
    size: usize,
    entries: BTreeMap<usize, V>,
    zero: V,
}

impl<V: Clone> SparseStorage<V> {
    /// `size` implicit zero slots.
    pub fn new(size: usize, zero: V) -> Self {
        SparseStorage {
            size,
            entries: BTreeMap::new(),
            zero,
        }
    }

    /// Number of slots holding a written value.
    pub fn occupied(&self) -> usize {
        self.entries.len()
    }
}

impl<V: Clone> IndexedStorage<V> for SparseStorage<V> {
    fn size(&self) -> usize {
        self.size
    }

    fn get(&self, index: usize) -> Result<&V> {
        if index >= self.size {
            return Err(AlgebraError::out_of_bounds(index, self.size));
        }
        Ok(self.entries.get(&index).unwrap_or(&self.zero))
    }

    fn set(&mut self, index: usize, value: &V) -> Result<()> {
        if index >= self.size {
            return Err(AlgebraError::out_of_bounds(index, self.size));
        }
        self.entries.insert(index, value.clone());
        Ok(())
    }

    fn reallocate(&mut self, size: usize) {
        trace!(from = self.size, to = size, "reallocate sparse storage");
        self.size = size;
        self.entries.clear();
    }

    fn fill_zero(&mut self) {
        self.entries.clear();
    }

    fn thread_access(&self) -> ThreadAccess {
        ThreadAccess::Confined
    }
}

/// Storage of a container, dense or sparse.
#[derive(Debug, Clone)]
pub enum Storage<V> {
    /// Dense layout.
    Array(ArrayStorage<V>),
    /// Sparse layout.
    Sparse(SparseStorage<V>),
}

impl<V: Clone> Storage<V> {
    /// `size` zero values in the layout `construction` names.
    pub fn allocate(construction: StorageConstruction, size: usize, zero: V) -> Self {
        match construction {
            StorageConstruction::MemArray => Storage::Array(ArrayStorage::new(size, zero)),
            StorageConstruction::MemSparse => Storage::Sparse(SparseStorage::new(size, zero)),
        }
    }

    /// Dense storage holding `values`.
    pub fn from_values(values: Vec<V>, zero: V) -> Self {
        Storage::Array(ArrayStorage::from_values(values, zero))
    }

    /// Storage of kind `construction` holding `values`.
    pub fn from_values_as(construction: StorageConstruction, values: Vec<V>, zero: V) -> Self {
        match construction {
            StorageConstruction::MemArray => Self::from_values(values, zero),
            StorageConstruction::MemSparse => Storage::Sparse(SparseStorage {
                size: values.len(),
                entries: values.into_iter().enumerate().collect(),
                zero,
            }),
        }
    }

    /// The layout of this storage.
    pub fn construction(&self) -> StorageConstruction {
        match self {
            Storage::Array(_) => StorageConstruction::MemArray,
            Storage::Sparse(_) => StorageConstruction::MemSparse,
        }
    }

    /// Every slot in order, implicit zeros included.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        (0..self.size()).filter_map(move |i| self.get(i).ok())
    }
}

impl<V: Clone> IndexedStorage<V> for Storage<V> {
    fn size(&self) -> usize {
        match self {
            Storage::Array(s) => s.size(),
            Storage::Sparse(s) => s.size(),
        }
    }

    fn get(&self, index: usize) -> Result<&V> {
        match self {
            Storage::Array(s) => s.get(index),
            Storage::Sparse(s) => s.get(index),
        }
    }

    fn set(&mut self, index: usize, value: &V) -> Result<()> {
        match self {
            Storage::Array(s) => s.set(index, value),
            Storage::Sparse(s) => s.set(index, value),
        }
    }

    fn reallocate(&mut self, size: usize) {
        match self {
            Storage::Array(s) => s.reallocate(size),
            Storage::Sparse(s) => s.reallocate(size),
        }
    }

    fn fill_zero(&mut self) {
        match self {
            Storage::Array(s) => s.fill_zero(),
            Storage::Sparse(s) => s.fill_zero(),
        }
    }

    fn thread_access(&self) -> ThreadAccess {
        match self {
            Storage::Array(s) => s.thread_access(),
            Storage::Sparse(s) => s.thread_access(),
        }
    }
}

impl<V: Clone + PartialEq> PartialEq for Storage<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<V: Clone + Eq> Eq for Storage<V> {}

impl<V: Clone + core::hash::Hash> core::hash::Hash for Storage<V> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        for v in self.iter() {
            v.hash(state);
        }
    }
}
