use crate::config::DEFAULT_BLOCK_SIZE;
use crate::{Error, Result};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A growable array that never relocates its elements
///
/// Storage is a list of fixed-capacity blocks. Growth only ever allocates a
/// new block, so a reference or address handed out for an element stays
/// valid until the element is popped or the array itself is dropped.
/// Copies allocate fresh blocks; moves keep the blocks.
pub struct BlockArray<T> {
    /// Every block is allocated with capacity for `block_size` elements and
    /// never holds more, so pushing into it never reallocates
    blocks: Vec<Vec<T>>,
    block_size: usize,
    max_blocks: Option<usize>,
    len: usize,
}

impl<T> BlockArray<T> {
    pub fn new() -> Self {
        Self::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    /// A block size of zero is treated as one
    pub fn with_block_size(block_size: usize) -> Self {
        Self::with_limits(block_size, None)
    }

    /// Array that refuses to allocate more than `max_blocks` blocks
    pub fn with_limits(block_size: usize, max_blocks: Option<usize>) -> Self {
        Self {
            blocks: Vec::new(),
            block_size: block_size.max(1),
            max_blocks,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of physically allocated blocks (never decreases)
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * self.block_size
    }

    #[inline]
    pub fn max_blocks(&self) -> Option<usize> {
        self.max_blocks
    }

    fn add_block(&mut self) -> Result<()> {
        if let Some(max) = self.max_blocks {
            if self.blocks.len() >= max {
                return Err(Error::array_unable_to_insert());
            }
        }
        let mut block = Vec::new();
        block
            .try_reserve_exact(self.block_size)
            .map_err(|_| Error::array_unable_to_insert())?;
        self.blocks
            .try_reserve(1)
            .map_err(|_| Error::array_unable_to_insert())?;
        self.blocks.push(block);
        Ok(())
    }

    /// Append an element, allocating a new block first when the current ones are full
    ///
    /// On failure the array is left exactly as it was.
    pub fn push(&mut self, value: T) -> Result<&mut T> {
        let block = self.len / self.block_size;
        // blocks retained after a pop are reused before allocating
        if block == self.blocks.len() {
            self.add_block()?;
        }
        let slot = &mut self.blocks[block];
        slot.push(value);
        self.len += 1;
        let offset = slot.len() - 1;
        Ok(&mut slot[offset])
    }

    /// Remove and return the last element; blocks are kept for reuse
    pub fn pop(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::array_popping_empty());
        }
        let block = (self.len - 1) / self.block_size;
        let value = self.blocks[block]
            .pop()
            .ok_or_else(Error::array_popping_empty)?;
        self.len -= 1;
        Ok(value)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(Error::array_invalid_index(index));
        }
        Ok(&self.blocks[index / self.block_size][index % self.block_size])
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(Error::array_invalid_index(index));
        }
        Ok(&mut self.blocks[index / self.block_size][index % self.block_size])
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i).ok())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.blocks.iter().flatten(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.blocks.iter_mut().flatten(),
            remaining: self.len,
        }
    }

    /// Move the contents out, leaving an empty array with the same block size and limits
    pub fn take(&mut self) -> Self {
        let empty = Self::with_limits(self.block_size, self.max_blocks);
        std::mem::replace(self, empty)
    }
}

impl<T: Clone> BlockArray<T> {
    /// Fallible copy into freshly allocated blocks
    pub fn try_clone(&self) -> Result<Self> {
        let mut blocks: Vec<Vec<T>> = Vec::new();
        blocks
            .try_reserve_exact(self.blocks.len())
            .map_err(|_| Error::array_unable_to_insert())?;
        for block in &self.blocks {
            let mut fresh = Vec::new();
            fresh
                .try_reserve_exact(self.block_size)
                .map_err(|_| Error::array_unable_to_insert())?;
            fresh.extend_from_slice(block);
            blocks.push(fresh);
        }
        Ok(Self {
            blocks,
            block_size: self.block_size,
            max_blocks: self.max_blocks,
            len: self.len,
        })
    }
}

impl<T: Clone> Clone for BlockArray<T> {
    fn clone(&self) -> Self {
        // Vec::clone would shrink the capacity of a partial block to its length
        let blocks = self
            .blocks
            .iter()
            .map(|block| {
                let mut fresh = Vec::with_capacity(self.block_size);
                fresh.extend_from_slice(block);
                fresh
            })
            .collect();
        Self {
            blocks,
            block_size: self.block_size,
            max_blocks: self.max_blocks,
            len: self.len,
        }
    }
}

impl<T> Default for BlockArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for BlockArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for BlockArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BlockArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for BlockArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

impl<'a, T> IntoIterator for &'a BlockArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BlockArray<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Forward iterator over a [`BlockArray`]
pub struct Iter<'a, T> {
    inner: std::iter::Flatten<std::slice::Iter<'a, Vec<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutable forward iterator over a [`BlockArray`]
pub struct IterMut<'a, T> {
    inner: std::iter::Flatten<std::slice::IterMut<'a, Vec<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
