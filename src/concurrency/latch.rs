//! A countdown latch used as the level barrier of the worker pool.
//!
//! The coordinator creates one latch per parallel level with a count equal to the
//! number of dispatched drain tasks, then blocks in [`CountdownLatch::wait`]
//! until every task has counted down.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A one-shot latch that opens once its count reaches zero.
pub struct CountdownLatch {
    remaining: Mutex<usize>,
    opened: Condvar,
}

impl CountdownLatch {
    /// Creates a latch that opens after `count` calls to [`count_down`](Self::count_down).
    pub fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            opened: Condvar::new(),
        }
    }

    // A poisoned lock only means some holder panicked; the count itself is
    // still meaningful, so waiting continues with the inner guard.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.remaining.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decrements the count, waking all waiters when it reaches zero.
    ///
    /// Extra calls after the latch opened are ignored.
    pub fn count_down(&self) {
        let mut remaining = self.lock();
        if *remaining == 0 {
            return;
        }
        *remaining -= 1;
        if *remaining == 0 {
            self.opened.notify_all();
        }
    }

    /// Returns the current count.
    pub fn remaining(&self) -> usize {
        *self.lock()
    }

    /// Blocks until the count reaches zero.
    pub fn wait(&self) {
        let mut remaining = self.lock();
        while *remaining != 0 {
            remaining = self
                .opened
                .wait(remaining)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until the count reaches zero or `timeout` elapses.
    ///
    /// Returns `true` if the latch opened.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut remaining = self.lock();
        while *remaining != 0 {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .opened
                .wait_timeout(remaining, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            remaining = guard;
        }
        true
    }
}

/// Counts a latch down when dropped, so a task signals completion even if it panics.
pub struct CountDownOnDrop<'a>(pub &'a CountdownLatch);

impl Drop for CountDownOnDrop<'_> {
    fn drop(&mut self) {
        self.0.count_down();
    }
}
