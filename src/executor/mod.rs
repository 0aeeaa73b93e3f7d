//! # TaskExecutor
//!
//! Task executors run a batch of independent jobs, the fitness evaluations
//! of one generation, to completion or until the configured timeout
//! elapses. Two executors are provided:
//!
//! - [`SequentialTaskExecutor`] runs the jobs one after the other on the
//!   calling thread.
//! - [`ParallelTaskExecutor`] dispatches them to a bounded rayon worker pool.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use evolvex::executor::{ParallelTaskExecutor, TaskExecutor};
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let mut executor = ParallelTaskExecutor::new(2, 4).unwrap();
//!
//! for _ in 0..10 {
//!     let counter = Arc::clone(&counter);
//!     executor.add(Box::new(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     }));
//! }
//!
//! assert!(executor.start().unwrap());
//! assert_eq!(counter.load(Ordering::SeqCst), 10);
//! ```
//!
//! A batch is cancelled from another thread through the executor's
//! [`CancelHandle`], obtained before calling `start`.
pub mod parallel;
pub mod sequential;

use std::any::Any;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

/// A unit of work handed to a [`TaskExecutor`]. Being `FnOnce`, a job can
/// run at most once.
pub type Job = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// Cancels the batch an executor is running, from any thread.
///
/// `start` blocks its caller, so the executor hands out this handle before
/// the batch begins. Jobs not yet started when [`cancel`](CancelHandle::cancel)
/// is called are skipped and `start` returns `Ok(false)`. Jobs already
/// running finish normally. The flag is cleared by the next `start`.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

/// Runs batches of independent jobs.
pub trait TaskExecutor: Debug + Send {
    /// Queues a job for the next [`start`](TaskExecutor::start).
    fn add(&mut self, job: Job);

    /// Runs every queued job.
    ///
    /// Returns `Ok(true)` once all jobs have completed, or `Ok(false)` if the
    /// timeout elapsed first.
    ///
    /// # Errors
    ///
    /// Returns the error of a failed job.
    fn start(&mut self) -> Result<bool>;

    /// A handle cancelling the running batch; clones share one flag.
    fn cancel_handle(&self) -> CancelHandle;

    /// Cancels the jobs of the running batch that have not started yet.
    fn stop(&self) {
        self.cancel_handle().cancel();
    }

    /// Drops every queued job.
    fn clear(&mut self);

    /// Number of queued jobs.
    fn pending(&self) -> usize;

    /// Maximum duration of a batch; `None` means unbounded.
    fn timeout(&self) -> Option<Duration>;

    fn set_timeout(&mut self, timeout: Option<Duration>);
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

pub use parallel::ParallelTaskExecutor;
pub use sequential::SequentialTaskExecutor;
