//! A fixed-size, branded worker pool with per-level dispatch.
//!
//! The pool is spawned once per parallel traversal inside a `std::thread::scope`.
//! Every worker shares `&GhostToken<'brand>` (read-scope pattern) and pulls
//! [`LevelTask`]s from one MPMC task channel, so tasks go to whichever worker is
//! idle first. A level is dispatched as `workers` tasks sharing one
//! [`CountdownLatch`]; [`LevelPool::run_level`] returns only after all of them
//! finished, which is the level barrier.
//!
//! Teardown closes the channel and waits a bounded time for workers to exit. If
//! the wait times out the pool raises its cancel flag, which jobs poll between
//! units of work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::Scope;
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::latch::{CountDownOnDrop, CountdownLatch};
use crate::GhostToken;

/// One drain task of one level.
///
/// Counts its level latch down when dropped: after the job ran, while unwinding
/// out of a panicking job, or when it could not be delivered at all.
pub struct LevelTask {
    /// Index of the frontier slot to drain.
    pub source: usize,
    done: Arc<CountdownLatch>,
}

impl Drop for LevelTask {
    fn drop(&mut self) {
        self.done.count_down();
    }
}

/// How the pool's teardown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Teardown {
    /// Every worker exited within the shutdown timeout.
    Graceful,
    /// The timeout elapsed and the cancel flag was raised.
    Cancelled,
}

/// Handle to a running pool. Dropping it without [`shutdown`](Self::shutdown)
/// still closes the task channel, so workers exit at the end of the scope.
pub struct LevelPool {
    tasks: Option<Sender<LevelTask>>,
    workers: usize,
    exited: Arc<CountdownLatch>,
    cancel: Arc<AtomicBool>,
}

impl LevelPool {
    /// Spawns `workers` threads on `scope`, each running `job` for every task it receives.
    ///
    /// `job` gets the shared token, the task, and the pool's cancel flag.
    ///
    /// # Panics
    /// Panics if `workers == 0`.
    pub fn spawn<'scope, 'env, 'brand, F>(
        scope: &'scope Scope<'scope, 'env>,
        token: &'env GhostToken<'brand>,
        workers: usize,
        job: &'env F,
    ) -> Self
    where
        F: Fn(&'env GhostToken<'brand>, &LevelTask, &AtomicBool) + Sync,
    {
        assert!(workers != 0, "workers must be > 0");

        let (tx, rx) = unbounded::<LevelTask>();
        let exited = Arc::new(CountdownLatch::new(workers));
        let cancel = Arc::new(AtomicBool::new(false));

        for _ in 0..workers {
            let rx = rx.clone();
            let exited = Arc::clone(&exited);
            let cancel = Arc::clone(&cancel);
            scope.spawn(move || {
                let _exit = CountDownOnDrop(&exited);
                for task in rx.iter() {
                    if cancel.load(Ordering::Acquire) {
                        continue;
                    }
                    job(token, &task, &*cancel);
                }
            });
        }

        Self {
            tasks: Some(tx),
            workers,
            exited,
            cancel,
        }
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns whether teardown cancelled the workers.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Sends one task per worker for `source` and returns the level latch without waiting.
    pub fn dispatch(&self, source: usize) -> Arc<CountdownLatch> {
        let done = Arc::new(CountdownLatch::new(self.workers));
        for _ in 0..self.workers {
            let task = LevelTask {
                source,
                done: Arc::clone(&done),
            };
            match &self.tasks {
                // A failed send hands the task back; dropping it counts the latch down.
                Some(tx) => drop(tx.send(task)),
                None => drop(task),
            }
        }
        done
    }

    /// Dispatches a level and blocks until every task of it has finished.
    pub fn run_level(&self, source: usize) {
        self.dispatch(source).wait();
    }

    /// Closes the task channel and waits up to `timeout` for the workers to exit.
    ///
    /// On timeout the cancel flag is raised and [`Teardown::Cancelled`] is returned;
    /// the enclosing scope still joins the workers once they observe the flag.
    pub fn shutdown(&mut self, timeout: Duration) -> Teardown {
        drop(self.tasks.take());
        if self.exited.wait_timeout(timeout) {
            Teardown::Graceful
        } else {
            self.cancel.store(true, Ordering::Release);
            warn!(
                workers = self.workers,
                still_running = self.exited.remaining(),
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "worker pool did not stop in time, cancelling"
            );
            Teardown::Cancelled
        }
    }
}
