//! Admission control for the fallback key scan.
//!
//! Two caps bound the linear scan: a process-lifetime budget that is never
//! replenished, and a per-window rate counter that resets every 60 seconds.
//! Both live behind one mutex so admission is a single atomic decision —
//! with a budget of one, two concurrent callers can never both be admitted.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Length of the rate-limit window.
const WINDOW: Duration = Duration::from_secs(60);

struct BudgetInner {
    remaining: u64,
    window_started: Instant,
    window_count: u64,
}

/// Shared scan-admission state, owned by the server for its lifetime.
pub struct ScanBudget {
    inner: Mutex<BudgetInner>,
    rate_limit: u64,
}

impl ScanBudget {
    /// Create a fresh budget: `budget` lifetime scans, at most `rate_limit`
    /// per window.
    pub fn new(budget: u64, rate_limit: u64) -> Self {
        Self {
            inner: Mutex::new(BudgetInner {
                remaining: budget,
                window_started: Instant::now(),
                window_count: 0,
            }),
            rate_limit,
        }
    }

    /// Try to admit one scan attempt.
    ///
    /// On admission the lifetime budget is consumed and the window counter
    /// incremented. A rejection consumes nothing. Fail closed: a poisoned
    /// lock rejects.
    pub fn try_admit(&self) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        let now = Instant::now();
        if now.duration_since(inner.window_started) >= WINDOW {
            inner.window_started = now;
            inner.window_count = 0;
        }
        if inner.remaining == 0 || inner.window_count >= self.rate_limit {
            return false;
        }
        inner.remaining -= 1;
        inner.window_count += 1;
        true
    }

    /// Remaining lifetime budget.
    pub fn remaining(&self) -> u64 {
        self.inner.lock().map(|inner| inner.remaining).unwrap_or(0)
    }
}
