//! A fixed-capacity associative container using separate chaining.
//!
//! Unlike the maps in the standard library, [`ChainMap`] never
//! resizes: the bucket count is chosen at construction and stays
//! fixed, so insertion cost never spikes and collision behavior is
//! fully determined by the injected bucket-selection strategy.
//!
//! That strategy is an explicit constructor argument rather than a
//! hidden global, which lets callers force collisions in tests or
//! swap in domain-specific key distribution without touching the
//! container.
//!
//! Single-threaded use only; the container makes no concurrency
//! guarantees.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// A bucket-selection strategy mapping a key to a bucket index.
///
/// Implementations must be deterministic and return an index below
/// the bucket count they are given.
pub type BucketFn<K> = Box<dyn Fn(&K, usize) -> usize>;

fn default_bucket<K: Hash>(key: &K, buckets: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);

    (hasher.finish() % buckets as u64) as usize
}

/// A non-resizing key/value map resolving collisions by chaining
/// entries within a bucket.
pub struct ChainMap<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    bucket_fn: BucketFn<K>,
}

impl<K: Eq + Hash + 'static, V> ChainMap<K, V> {
    /// Creates a map with `capacity` buckets and the default
    /// bucket-selection strategy based on [`DefaultHasher`].
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_bucket_fn(capacity, Box::new(default_bucket))
    }
}

impl<K: Eq, V> ChainMap<K, V> {
    /// Creates a map with `capacity` buckets and a caller-supplied
    /// bucket-selection strategy.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    pub fn with_bucket_fn(capacity: usize, bucket_fn: BucketFn<K>) -> Self {
        assert!(capacity > 0, "map needs at least one bucket");

        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);

        Self {
            buckets,
            len: 0,
            bucket_fn,
        }
    }

    /// The number of entries currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn chain_of(&self, key: &K) -> usize {
        let index = (self.bucket_fn)(key, self.buckets.len());
        debug_assert!(index < self.buckets.len());

        index
    }

    /// Inserts `value` under `key`, overwriting and returning any
    /// previous value for the same key.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let index = self.chain_of(&key);
        let chain = &mut self.buckets[index];

        for (existing, slot) in chain.iter_mut() {
            if *existing == key {
                return Some(std::mem::replace(slot, value));
            }
        }

        chain.push((key, value));
        self.len += 1;

        None
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let chain = &self.buckets[self.chain_of(key)];
        chain.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.chain_of(key);
        let chain = &mut self.buckets[index];

        let position = chain.iter().position(|(k, _)| k == key)?;
        self.len -= 1;

        Some(chain.swap_remove(position).1)
    }

    /// Whether an entry is stored under `key`.
    pub fn has(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}
