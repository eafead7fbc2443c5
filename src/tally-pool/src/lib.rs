//! Implementation of a worker pool for CPU-bound task processing.
//!
//! # Motivation
//!
//! Tally's primary use case for multithreading is fanning a large
//! in-memory computation out over all available cores and collecting
//! the per-chunk results back on the submitting thread.
//!
//! Such workloads are short and bursty; workers rarely sit idle for
//! long. The pool is therefore tuned for dispatch latency over idle
//! efficiency, with the idle behavior left configurable through
//! [`IdlePolicy`].
//!
//! # Design
//!
//! A fixed number of worker threads is spawned at construction and
//! lives for the lifetime of the pool. Tasks enter an unbounded FIFO
//! queue guarded by a mutex that is only ever held for pointer-sized
//! critical sections; execution itself always happens outside the
//! lock.
//!
//! Every submission returns a [`Handle`] through which the caller
//! retrieves the task's result. Handles own their state outright, so
//! they remain valid even after the pool itself has been torn down.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod handle;
pub use handle::{Handle, TaskFailed};

mod pool;
pub use pool::*;
