//! Byte-frequency histograms over in-memory buffers.
//!
//! A histogram counts how often each of the 256 possible byte values
//! occurs in a buffer. Counting is embarrassingly parallel: the
//! buffer splits into contiguous chunks, each chunk is counted into
//! a private table on a [`tally_pool`] worker, and the tables merge
//! through a commutative, associative per-bucket addition.
//!
//! [`reduce`] implements exactly that split/count/merge pipeline;
//! [`count`] is the single-threaded counting kernel it runs per
//! chunk.

#![deny(
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    unsafe_op_in_unsafe_fn
)]

mod histogram;
pub use histogram::{count, count_naive, Histogram, NUM_BUCKETS};

mod plan;
pub use plan::ChunkPlan;

mod reduce;
pub use reduce::{reduce, reduce_with, ReduceError};
