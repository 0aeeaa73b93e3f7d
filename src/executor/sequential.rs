use std::fmt;
use std::time::{Duration, Instant};

use tracing::warn;

use super::{CancelHandle, Job, TaskExecutor};
use crate::error::Result;

/// Runs the jobs one at a time on the calling thread.
///
/// A failing job aborts the batch: its error is returned and the remaining
/// jobs are dropped. The timeout and the [`CancelHandle`] are checked between
/// jobs.
#[derive(Default)]
pub struct SequentialTaskExecutor {
    jobs: Vec<Job>,
    timeout: Option<Duration>,
    cancel: CancelHandle,
}

impl SequentialTaskExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl TaskExecutor for SequentialTaskExecutor {
    fn add(&mut self, job: Job) {
        self.jobs.push(job);
    }

    fn start(&mut self) -> Result<bool> {
        self.cancel.reset();
        let started = Instant::now();
        let total = self.jobs.len();

        for (done, job) in self.jobs.drain(..).enumerate() {
            if self.cancel.is_cancelled() {
                warn!(done, total, "Sequential batch cancelled before completion");
                return Ok(false);
            }

            job()?;

            if let Some(timeout) = self.timeout {
                if started.elapsed() > timeout {
                    warn!(done = done + 1, total, ?timeout, "Sequential batch timed out");
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    fn clear(&mut self) {
        self.jobs.clear();
    }

    fn pending(&self) -> usize {
        self.jobs.len()
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }
}

impl fmt::Debug for SequentialTaskExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialTaskExecutor")
            .field("pending", &self.jobs.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}
