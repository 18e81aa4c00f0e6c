//! Shared decoder/encoder worker.
//!
//! Grounded on Pan's `Decoder`/`Encoder` (`WorkerPool::Worker` subclasses):
//! the codec work runs off the task-scheduling loop, and progress is a
//! `(percent, current_file)` pair set from the worker side and polled from
//! the scheduler side through a mutex, rather than pushed via callback.
//! `Queue` owns one [`Worker`] for decoding and one for encoding; only one
//! task may hold either at a time, mirroring Pan's `_decoder_task` pointer.

use crate::quark::Quark;
use std::sync::Mutex;

/// A worker's last-reported progress, sampled by whoever polls it (the
/// queue, ultimately a UI timer).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerProgress {
    pub percent: f64,
    pub current_file: String,
}

/// Single-holder codec worker. The CPU-heavy part of a decode/encode step
/// runs in a blocking task (`tokio::task::spawn_blocking`); this struct is
/// the seam that work reports progress through and the arbitration point
/// that keeps two tasks from both claiming the worker at once.
#[derive(Debug, Default)]
pub struct Worker {
    holder: Mutex<Option<Quark>>,
    progress: Mutex<WorkerProgress>,
}

impl Worker {
    #[must_use]
    pub fn new() -> Self {
        Worker::default()
    }

    /// Claim the worker for `task`, if it's free or already held by that
    /// same task (re-entrant for a task mid-step). Returns whether the
    /// claim succeeded.
    pub fn try_acquire(&self, task: &Quark) -> bool {
        let mut holder = self.holder.lock().unwrap();
        match holder.as_ref() {
            None => {
                *holder = Some(task.clone());
                true
            }
            Some(current) => current == task,
        }
    }

    /// Release the worker. No-op if `task` isn't the current holder.
    pub fn release(&self, task: &Quark) {
        let mut holder = self.holder.lock().unwrap();
        if holder.as_ref() == Some(task) {
            *holder = None;
        }
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.holder.lock().unwrap().is_some()
    }

    /// Set from the blocking work as it progresses.
    pub fn set_progress(&self, percent: f64, current_file: impl Into<String>) {
        let mut guard = self.progress.lock().unwrap();
        guard.percent = percent;
        guard.current_file = current_file.into();
    }

    /// Sampled by the scheduler/UI; never blocks on the worker doing its
    /// codec pass.
    #[must_use]
    pub fn progress(&self) -> WorkerProgress {
        self.progress.lock().unwrap().clone()
    }
}
