use std::{any::Any, sync::mpsc};

use thiserror::Error;

/// The reason a submitted task did not produce a value.
#[derive(Clone, Debug, Error)]
pub enum TaskFailed {
    /// The task panicked while executing on a worker thread.
    ///
    /// The panic is confined to the task; the worker that ran it
    /// keeps processing the queue.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task was discarded before it could run.
    ///
    /// This only happens when the pool is torn down with the task
    /// still queued, which the regular shutdown path never does.
    #[error("task was discarded before it could run")]
    Discarded,
}

impl TaskFailed {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(&s) = payload.downcast_ref::<&'static str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "<non-string payload>".to_string()
        };

        Self::Panicked(message)
    }
}

/// A one-shot result slot for a task submitted to the pool.
///
/// The worker executing the paired task writes the outcome exactly
/// once; the submitter retrieves it through [`Handle::get`]. Both
/// operations consume their side, so double writes and double reads
/// are ruled out by ownership rather than documentation.
///
/// The handle does not borrow from the pool. It can outlive the pool
/// that produced it and still be read afterwards.
#[derive(Debug)]
pub struct Handle<T> {
    rx: mpsc::Receiver<Result<T, TaskFailed>>,
}

impl<T> Handle<T> {
    pub(crate) fn new(rx: mpsc::Receiver<Result<T, TaskFailed>>) -> Self {
        Self { rx }
    }

    /// Blocks the calling thread until the paired task finishes, then
    /// returns its value.
    ///
    /// A task that panicked reports [`TaskFailed::Panicked`] here
    /// instead of crashing the pool.
    pub fn get(self) -> Result<T, TaskFailed> {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(mpsc::RecvError) => Err(TaskFailed::Discarded),
        }
    }

    /// Polls for the task's outcome without blocking.
    ///
    /// Returns the handle back in `Err` when the task has not
    /// finished yet, so the caller can retry or fall back to
    /// [`Handle::get`].
    pub fn try_get(self) -> Result<Result<T, TaskFailed>, Self> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(outcome),
            Err(mpsc::TryRecvError::Empty) => Err(self),
            Err(mpsc::TryRecvError::Disconnected) => Ok(Err(TaskFailed::Discarded)),
        }
    }
}
