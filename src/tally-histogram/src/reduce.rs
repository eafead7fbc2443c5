use std::mem;

use thiserror::Error;

use tally_pool::{BuildError, TaskFailed, ThreadPool};

use crate::{count, histogram::Histogram, plan::ChunkPlan};

/// Errors that can occur during a parallel reduction.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// The worker pool could not be constructed.
    #[error("failed to construct worker pool")]
    Pool(#[from] BuildError),

    /// A chunk's counting task failed.
    ///
    /// No partial table escapes in this case; the reduction aborts
    /// with the first failure it encounters.
    #[error("counting chunk {index} failed")]
    Chunk {
        index: usize,
        source: TaskFailed,
    },
}

/// Counts byte frequencies in `buffer` by fanning chunks out over a
/// worker pool and merging the per-chunk tables.
///
/// `threads` chooses both the worker count and the number of chunks;
/// pass 0 to size the pool by the detected hardware concurrency (or
/// the `TALLY_WORKER_THREADS` override). A `threads` larger than the
/// buffer degrades gracefully: surplus chunks are empty and never
/// submitted.
///
/// The result equals [`count_naive`] over the whole buffer for every
/// valid thread count.
///
/// [`count_naive`]: crate::count_naive
pub fn reduce(buffer: &[u8], threads: usize) -> Result<Histogram, ReduceError> {
    reduce_with(buffer, threads, count)
}

/// [`reduce`] with a caller-supplied counting function.
///
/// `counter` must be pure and callable from any thread; each chunk
/// invokes it exactly once on that chunk's slice.
pub fn reduce_with<C>(buffer: &[u8], threads: usize, counter: C) -> Result<Histogram, ReduceError>
where
    C: Fn(&[u8]) -> Histogram + Copy + Send + 'static,
{
    if buffer.is_empty() {
        return Ok(Histogram::new());
    }

    let pool = match threads {
        0 => ThreadPool::new()?,
        n => ThreadPool::with_threads(n).map_err(BuildError::Spawn)?,
    };

    let plan = ChunkPlan::new(buffer.len(), pool.thread_count());
    log::debug!(
        "reducing {} bytes over {} chunks",
        buffer.len(),
        plan.chunk_count()
    );

    let mut handles = Vec::with_capacity(plan.chunk_count());
    for range in &plan {
        let chunk = &buffer[range];

        // SAFETY: every handle is drained below before this function
        // returns, and dropping the pool waits for all pending tasks
        // first, so no task can observe the slice once the borrow of
        // `buffer` ends.
        let chunk = unsafe { mem::transmute::<&[u8], &'static [u8]>(chunk) };

        handles.push(pool.submit(move || counter(chunk)));
    }

    // Reading the handles in submission order doubles as the barrier
    // for all chunk computations.
    let mut hist = Histogram::new();
    for (index, handle) in handles.into_iter().enumerate() {
        let partial = handle
            .get()
            .map_err(|source| ReduceError::Chunk { index, source })?;

        hist.merge(&partial);
    }

    Ok(hist)
}
