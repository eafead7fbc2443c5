use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    sync::Arc,
    thread,
};

use parking_lot::{Condvar, Mutex};

use super::IdlePolicy;

pub(super) type Job = Box<dyn FnOnce() + Send + 'static>;

/// State shared between the pool front-end and its workers.
///
/// The mutex guards nothing but the queue linkage itself; jobs are
/// always executed with the lock released.
pub(super) struct Shared {
    queue: Mutex<VecDeque<Job>>,
    available: Condvar,
    pending: AtomicUsize,
    stop: AtomicBool,
    idle: IdlePolicy,
}

impl Shared {
    pub(super) fn new(idle: IdlePolicy) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            pending: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            idle,
        }
    }

    #[inline]
    pub(super) fn pending_tasks(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Appends a job to the queue tail and accounts for it in the
    /// pending counter.
    pub(super) fn push(&self, job: Job) {
        // The counter must cover the job before it becomes visible
        // to workers; shutdown keys off pending hitting zero.
        self.pending.fetch_add(1, Ordering::Release);

        self.queue.lock().push_back(job);
        self.available.notify_one();
    }

    /// Signals the workers to terminate once the queue is empty and
    /// wakes any that are parked.
    pub(super) fn begin_shutdown(&self) {
        self.stop.store(true, Ordering::Release);

        // Taking the lock orders the wakeup after any worker that is
        // between its empty-queue check and the wait call.
        let _queue = self.queue.lock();
        self.available.notify_all();
    }

    fn wait_for_work(&self) {
        match self.idle {
            IdlePolicy::Spin => thread::yield_now(),

            IdlePolicy::Park => {
                let mut queue = self.queue.lock();
                if queue.is_empty() && !self.stop.load(Ordering::Acquire) {
                    self.available.wait(&mut queue);
                }
            }
        }
    }
}

/// The main loop of a worker thread.
///
/// Terminates only when shutdown has been signaled and no task was
/// available to dequeue, so a stop request never strands queued work.
pub(super) fn run(shared: Arc<Shared>) {
    log::trace!("worker thread started");

    loop {
        let job = shared.queue.lock().pop_front();

        match job {
            Some(job) => {
                job();
                shared.pending.fetch_sub(1, Ordering::Release);
            }

            None if shared.stop.load(Ordering::Acquire) => break,

            None => shared.wait_for_work(),
        }
    }

    log::trace!("worker thread exiting");
}
