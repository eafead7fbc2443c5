use std::ops::Index;

/// The number of buckets in a [`Histogram`], one per byte value.
pub const NUM_BUCKETS: usize = 256;

/// A frequency table over the byte value domain.
///
/// Buckets are 64 bits wide so that aggregate counts cannot wrap
/// for any buffer that fits in memory, including tables that were
/// merged from many partial results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram([u64; NUM_BUCKETS]);

impl Histogram {
    /// Creates a histogram with every bucket at zero.
    #[inline]
    pub const fn new() -> Self {
        Self([0; NUM_BUCKETS])
    }

    /// Adds every bucket of `other` into `self`.
    ///
    /// This is the fold operation for partial results; it commutes
    /// and associates, so merge order never affects the outcome.
    pub fn merge(&mut self, other: &Self) {
        for (acc, &n) in self.0.iter_mut().zip(other.0.iter()) {
            *acc += n;
        }
    }

    /// The sum over all buckets, i.e. the number of bytes counted
    /// into this table.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Iterates over `(byte value, count)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0.iter().enumerate().map(|(i, &n)| (i as u8, n))
    }

    #[inline]
    fn bump(&mut self, value: u8) {
        self.0[value as usize] += 1;
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u8> for Histogram {
    type Output = u64;

    fn index(&self, value: u8) -> &Self::Output {
        &self.0[value as usize]
    }
}

impl Index<usize> for Histogram {
    type Output = u64;

    fn index(&self, bucket: usize) -> &Self::Output {
        &self.0[bucket]
    }
}

/// Counts byte frequencies in `buffer` with the obvious scalar loop.
///
/// Serves as the reference implementation for [`count`]; prefer that
/// one for real workloads.
pub fn count_naive(buffer: &[u8]) -> Histogram {
    let mut hist = Histogram::new();
    for &byte in buffer {
        hist.bump(byte);
    }

    hist
}

/// Counts byte frequencies in `buffer`.
///
/// Pure and reentrant; safe to call concurrently on disjoint slices
/// from any thread.
///
/// # Implementation
///
/// Consecutive increments of the same bucket form a store-to-load
/// dependency chain that stalls on runs of equal bytes. Counting
/// into four interleaved sub-tables breaks the chain for runs up to
/// four, which is what out-of-order hardware needs to keep multiple
/// increments in flight. The sub-tables fold into one at the end.
pub fn count(buffer: &[u8]) -> Histogram {
    let mut lanes = [[0u64; NUM_BUCKETS]; 4];

    let mut quads = buffer.chunks_exact(4);
    for quad in quads.by_ref() {
        lanes[0][quad[0] as usize] += 1;
        lanes[1][quad[1] as usize] += 1;
        lanes[2][quad[2] as usize] += 1;
        lanes[3][quad[3] as usize] += 1;
    }

    for &byte in quads.remainder() {
        lanes[0][byte as usize] += 1;
    }

    let mut hist = Histogram::new();
    for lane in &lanes {
        for (acc, &n) in hist.0.iter_mut().zip(lane.iter()) {
            *acc += n;
        }
    }

    hist
}
