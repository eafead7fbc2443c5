use std::ops::Range;

/// A deterministic partition of a buffer into near-equal contiguous
/// chunks for parallel processing.
///
/// A buffer of length `len` splits into `parts` pieces of `len /
/// parts` bytes each, with the remainder distributed one byte at a
/// time over the leading chunks. Chunks are contiguous and
/// non-overlapping, their union covers the whole buffer, and empty
/// chunks are skipped during iteration.
#[derive(Clone, Copy, Debug)]
pub struct ChunkPlan {
    len: usize,
    parts: usize,
}

impl ChunkPlan {
    /// Creates a plan splitting `len` elements into `parts` chunks.
    ///
    /// # Panics
    ///
    /// Panics when `parts` is zero; resolving a default part count
    /// is the caller's job.
    pub fn new(len: usize, parts: usize) -> Self {
        assert!(parts > 0, "cannot split a buffer into zero chunks");
        Self { len, parts }
    }

    /// The number of non-empty chunks the plan yields.
    pub fn chunk_count(&self) -> usize {
        self.parts.min(self.len)
    }

    /// Iterates over the byte ranges of the non-empty chunks, in
    /// buffer order.
    pub fn iter(&self) -> Chunks {
        Chunks {
            base: self.len / self.parts,
            extra: self.len % self.parts,
            parts: self.parts,
            index: 0,
            offset: 0,
        }
    }
}

impl IntoIterator for &ChunkPlan {
    type Item = Range<usize>;
    type IntoIter = Chunks;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the chunk ranges of a [`ChunkPlan`].
#[derive(Clone, Debug)]
pub struct Chunks {
    base: usize,
    extra: usize,
    parts: usize,
    index: usize,
    offset: usize,
}

impl Iterator for Chunks {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.parts {
            let size = self.base + usize::from(self.index < self.extra);
            self.index += 1;

            if size == 0 {
                continue;
            }

            let start = self.offset;
            self.offset += size;

            return Some(start..self.offset);
        }

        None
    }
}
