use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use super::{panic_message, CancelHandle, Job, TaskExecutor};
use crate::error::{GeneticError, Result};

enum JobOutcome {
    Done,
    Skipped,
    Failed(GeneticError),
}

/// Dispatches jobs to a bounded rayon worker pool.
///
/// The pool holds `clamp(jobs, min_threads, max_threads)` workers. It is
/// built for the first batch and rebuilt only when a larger batch needs more
/// workers. `start` blocks until every job has reported back or the timeout
/// elapses. On timeout the batch is cancelled: jobs that have not started are
/// skipped, and jobs already running finish on their worker without anyone
/// waiting for them. Cancelling through the [`CancelHandle`] also skips the
/// unstarted jobs, but `start` waits for the running ones.
///
/// A failing or panicking job never takes a worker down; the first failure is
/// returned once the whole batch has finished.
pub struct ParallelTaskExecutor {
    min_threads: usize,
    max_threads: usize,
    timeout: Option<Duration>,
    jobs: Vec<Job>,
    pool: Option<Arc<ThreadPool>>,
    cancel: CancelHandle,
}

impl ParallelTaskExecutor {
    /// Creates an executor using between `min_threads` and `max_threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if `min_threads` is zero or greater
    /// than `max_threads`.
    pub fn new(min_threads: usize, max_threads: usize) -> Result<Self> {
        if min_threads == 0 {
            return Err(GeneticError::Argument(
                "A worker pool needs at least one thread".to_string(),
            ));
        }
        if max_threads < min_threads {
            return Err(GeneticError::Argument(format!(
                "The maximum number of threads ({}) must be greater or equal to the minimum ({})",
                max_threads, min_threads
            )));
        }

        Ok(Self {
            min_threads,
            max_threads,
            timeout: None,
            jobs: Vec::new(),
            pool: None,
            cancel: CancelHandle::new(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn min_threads(&self) -> usize {
        self.min_threads
    }

    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Number of workers of the current pool, if one has been built.
    pub fn current_threads(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.current_num_threads())
    }

    fn pool_for(&mut self, batch_len: usize) -> Result<Arc<ThreadPool>> {
        let threads = batch_len.clamp(self.min_threads, self.max_threads);

        if let Some(pool) = &self.pool {
            if pool.current_num_threads() >= threads {
                return Ok(Arc::clone(pool));
            }
        }

        debug!(threads, "Building fitness worker pool");
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("evolvex-worker-{}", i))
            .build()
            .map_err(|e| GeneticError::Executor(format!("Failed to build worker pool: {}", e)))?;
        let pool = Arc::new(pool);
        self.pool = Some(Arc::clone(&pool));
        Ok(pool)
    }
}

impl TaskExecutor for ParallelTaskExecutor {
    fn add(&mut self, job: Job) {
        self.jobs.push(job);
    }

    fn start(&mut self) -> Result<bool> {
        let total = self.jobs.len();
        if total == 0 {
            return Ok(true);
        }

        let pool = self.pool_for(total)?;
        self.cancel.reset();
        // jobs of a timed out batch keep their own flag
        let timed_out = Arc::new(AtomicBool::new(false));

        let (tx, rx) = mpsc::channel();
        for job in self.jobs.drain(..) {
            let tx = tx.clone();
            let timed_out = Arc::clone(&timed_out);
            let cancel = self.cancel.clone();
            pool.spawn(move || {
                let outcome = if timed_out.load(Ordering::Acquire) || cancel.is_cancelled() {
                    JobOutcome::Skipped
                } else {
                    match panic::catch_unwind(AssertUnwindSafe(job)) {
                        Ok(Ok(())) => JobOutcome::Done,
                        Ok(Err(e)) => JobOutcome::Failed(e),
                        Err(payload) => JobOutcome::Failed(GeneticError::Executor(format!(
                            "Job panicked: {}",
                            panic_message(payload.as_ref())
                        ))),
                    }
                };
                // the collector is gone once the batch timed out
                let _ = tx.send(outcome);
            });
        }
        drop(tx);

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut completed = 0;
        let mut skipped = 0;
        let mut first_error = None;

        while completed < total {
            let outcome = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    match rx.recv_timeout(remaining) {
                        Ok(outcome) => outcome,
                        Err(RecvTimeoutError::Timeout) => {
                            timed_out.store(true, Ordering::Release);
                            warn!(completed, total, timeout = ?self.timeout, "Parallel batch timed out");
                            return Ok(false);
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match rx.recv() {
                    Ok(outcome) => outcome,
                    Err(_) => break,
                },
            };

            completed += 1;
            match outcome {
                JobOutcome::Done => {}
                JobOutcome::Skipped => skipped += 1,
                JobOutcome::Failed(e) => {
                    warn!(error = %e, "Job failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        if skipped > 0 {
            warn!(skipped, total, "Parallel batch cancelled before completion");
        }

        Ok(completed == total && skipped == 0)
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

impl fmt::Debug for ParallelTaskExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelTaskExecutor")
            .field("min_threads", &self.min_threads)
            .field("max_threads", &self.max_threads)
            .field("timeout", &self.timeout)
            .field("pending", &self.jobs.len())
            .finish()
    }
}
