//! Step-based progress tracking, shared by tasks and by the decoder/encoder
//! workers.
//!
//! The C++ original (`pan::Progress`) pushes updates to a set of registered
//! listeners. Per the redesign notes this crate instead exposes progress as
//! a plain, `Clone`-able snapshot behind a mutex: a worker thread updates
//! it as it goes, and whoever wants it (a UI timer, a test) calls
//! [`Progress::snapshot`] rather than subscribing to callbacks.

use std::sync::{Arc, Mutex};

/// A point-in-time view of a [`Progress`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Steps completed so far.
    pub step: u64,
    /// Total steps, or 0 if not yet known.
    pub steps: u64,
    /// Last status line set via [`Progress::set_status`].
    pub status: String,
    /// Errors recorded via [`Progress::set_error`], oldest first.
    pub errors: Vec<String>,
    /// `Some(status)` once [`Progress::set_finished`] has been called.
    pub finished: Option<i32>,
}

impl ProgressSnapshot {
    /// Percentage complete in `0..=100`. 0 if `steps` is unknown.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.steps == 0 {
            0
        } else {
            ((self.step.min(self.steps) * 100) / self.steps) as u8
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    step: u64,
    steps: u64,
    status: String,
    errors: Vec<String>,
    finished: Option<i32>,
}

/// Shared, thread-safe progress counter for a task or worker.
///
/// Cloning a `Progress` clones the handle, not the state — all clones see
/// the same counters, the way a C++ `Progress&` reference would.
#[derive(Debug, Clone)]
pub struct Progress(Arc<Mutex<Inner>>);

impl Progress {
    /// New, empty progress tracker with no steps set yet.
    #[must_use]
    pub fn new() -> Progress {
        Progress(Arc::new(Mutex::new(Inner::default())))
    }

    /// Set the total step count. Called once the task knows how much work
    /// there is (e.g. segment count for a download).
    pub fn init_steps(&self, steps: u64) {
        let mut inner = self.0.lock().unwrap();
        inner.steps = steps;
        inner.step = 0;
    }

    /// Add to the total step count, for tasks that discover more work
    /// partway through (e.g. a multipart yEnc header revising the part
    /// count).
    pub fn add_steps(&self, steps: u64) {
        self.0.lock().unwrap().steps += steps;
    }

    /// Mark `increment` more steps complete.
    pub fn increment_step(&self, increment: u64) {
        self.0.lock().unwrap().step += increment;
    }

    /// Jump directly to an absolute step count.
    pub fn set_step(&self, step: u64) {
        self.0.lock().unwrap().step = step;
    }

    /// Replace the current status line (e.g. "decoding part 3 of 7").
    pub fn set_status(&self, status: impl Into<String>) {
        self.0.lock().unwrap().status = status.into();
    }

    /// Record a non-fatal error without ending the task.
    pub fn set_error(&self, error: impl Into<String>) {
        self.0.lock().unwrap().errors.push(error.into());
    }

    /// Mark this progress as finished with the given status code
    /// (0 = success, matching the C++ convention).
    pub fn set_finished(&self, status: i32) {
        self.0.lock().unwrap().finished = Some(status);
    }

    /// True once [`Progress::set_finished`] has been called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.0.lock().unwrap().finished.is_some()
    }

    /// Take a consistent point-in-time copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.0.lock().unwrap();
        ProgressSnapshot {
            step: inner.step,
            steps: inner.steps,
            status: inner.status.clone(),
            errors: inner.errors.clone(),
            finished: inner.finished,
        }
    }
}

impl Default for Progress {
    fn default() -> Progress {
        Progress::new()
    }
}
