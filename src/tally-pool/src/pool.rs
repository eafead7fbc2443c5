use std::{
    env, io,
    panic,
    sync::{mpsc, Arc},
    thread,
};

use thiserror::Error;

use crate::handle::{Handle, TaskFailed};

mod worker;
use worker::Shared;

const TALLY_WORKER_THREADS: &str = "TALLY_WORKER_THREADS";

const WORKER_NAME: &str = "tally-worker";
const WORKER_STACK: usize = 1_048_576;

#[derive(Clone, Debug, Error)]
#[error(
    "invalid value in {}; must be a natural number",
    TALLY_WORKER_THREADS
)]
pub struct BadConfiguration;

/// Errors that can occur while constructing a [`ThreadPool`] with
/// the default configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The worker thread configuration is malformed.
    #[error(transparent)]
    Config(#[from] BadConfiguration),

    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread")]
    Spawn(#[from] io::Error),
}

fn available_threads() -> Result<usize, BadConfiguration> {
    match env::var(TALLY_WORKER_THREADS) {
        Ok(value) => match value.parse() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(BadConfiguration),
        },

        Err(_) => Ok(thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1)),
    }
}

/// The behavior of a worker thread while the queue is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdlePolicy {
    /// Yield to the scheduler and immediately poll the queue again.
    ///
    /// Wakes with effectively zero latency at the cost of burning
    /// CPU while idle. The right choice for short, bursty workloads
    /// where workers rarely wait.
    #[default]
    Spin,

    /// Park on a condition variable until a submission arrives.
    ///
    /// Trades some wake latency for an idle pool that consumes no
    /// CPU. Preferable when the pool outlives its bursts of work by
    /// a long stretch.
    Park,
}

/// A builder for configuring a [`ThreadPool`] before spawning its
/// workers.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    num_threads: Option<usize>,
    thread_name: Option<String>,
    thread_stack_size: Option<usize>,
    idle: IdlePolicy,
}

impl Builder {
    /// Creates a builder with all settings at their defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads, clamped to a minimum of 1.
    ///
    /// When not set, [`thread::available_parallelism`] decides.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n.max(1));
        self
    }

    /// Sets the name the worker threads report to the OS.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    /// Sets the stack size for every worker thread, in bytes.
    pub fn thread_stack_size(mut self, size: usize) -> Self {
        self.thread_stack_size = Some(size);
        self
    }

    /// Sets the idle behavior of the workers.
    pub fn idle_policy(mut self, idle: IdlePolicy) -> Self {
        self.idle = idle;
        self
    }

    /// Spawns the workers and returns the running pool.
    ///
    /// Fails when the OS cannot spawn a worker thread; workers that
    /// were already started are shut down again before returning.
    pub fn build(self) -> io::Result<ThreadPool> {
        let nthreads = match self.num_threads {
            Some(n) => n,
            None => thread::available_parallelism().map(|p| p.get()).unwrap_or(1),
        };

        let name = self.thread_name.unwrap_or_else(|| WORKER_NAME.into());
        let stack = self.thread_stack_size.unwrap_or(WORKER_STACK);

        let shared = Arc::new(Shared::new(self.idle));

        let mut workers = Vec::with_capacity(nthreads);
        for _ in 0..nthreads {
            let spawned = thread::Builder::new()
                .name(name.clone())
                .stack_size(stack)
                .spawn({
                    let shared = shared.clone();
                    move || worker::run(shared)
                });

            match spawned {
                Ok(handle) => workers.push(handle),

                Err(e) => {
                    shared.begin_shutdown();
                    for worker in workers {
                        let _ = worker.join();
                    }

                    return Err(e);
                }
            }
        }

        Ok(ThreadPool { shared, workers })
    }
}

/// A fixed-size pool of worker threads executing submitted tasks.
///
/// Configuration is possible with the `TALLY_WORKER_THREADS`
/// environment variable specifying the number of threads to use.
/// If not set, falls back to [`thread::available_parallelism`].
///
/// Tasks are dequeued in FIFO submission order across the whole
/// pool. Dropping the pool first lets every previously submitted
/// task run to completion, then terminates the workers.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl ThreadPool {
    /// Creates a pool sized by the environment, or by the detected
    /// hardware concurrency when no override is configured.
    pub fn new() -> Result<Self, BuildError> {
        let nthreads = available_threads()?;
        Builder::new()
            .num_threads(nthreads)
            .build()
            .map_err(BuildError::Spawn)
    }

    /// Creates a pool with an explicit number of worker threads,
    /// clamped to a minimum of 1.
    pub fn with_threads(nthreads: usize) -> io::Result<Self> {
        Builder::new().num_threads(nthreads).build()
    }

    /// The number of worker threads in the pool.
    #[inline]
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// The number of tasks that were submitted but have not finished
    /// executing yet.
    #[inline]
    pub fn pending_tasks(&self) -> usize {
        self.shared.pending_tasks()
    }

    /// Submits a task for execution and returns the [`Handle`] for
    /// retrieving its result.
    ///
    /// Never blocks; the queue has no capacity bound. The returned
    /// handle stays valid even after the pool is dropped.
    ///
    /// Submitting while the pool is concurrently being dropped is a
    /// usage error; the design assumes all submissions complete
    /// before teardown starts.
    pub fn submit<F, T>(&self, f: F) -> Handle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        // The panic is caught here, inside the erased task, so the
        // worker loop only ever sees a completed closure and the
        // payload ends up in the task's own handle.
        self.shared.push(Box::new(move || {
            let outcome = panic::catch_unwind(panic::AssertUnwindSafe(f))
                .map_err(TaskFailed::from_panic);
            let _ = tx.send(outcome);
        }));

        Handle::new(rx)
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        log::debug!(
            "shutting down pool with {} pending tasks",
            self.shared.pending_tasks()
        );

        // Let every submitted task run before the stop signal goes
        // out; workers only terminate on an empty queue.
        while self.shared.pending_tasks() > 0 {
            thread::yield_now();
        }

        self.shared.begin_shutdown();

        for worker in self.workers.drain(..) {
            if let Err(payload) = worker.join() {
                // Workers never unwind on their own, so this is an
                // unrecoverable state for the whole process.
                panic::resume_unwind(payload);
            }
        }
    }
}
