use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::types::RecordState;

/// Clock seam so freshness decisions are testable without real time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for tests.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// What the read path should do with a cached record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeDecision {
    pub serve_cached: bool,
    pub schedule_refresh: bool,
}

/// Serve-stale policy: a record past the freshness window is still served
/// to the caller, staleness only decides whether a background refresh is
/// scheduled. Reads never block on network I/O.
#[derive(Debug, Clone, Copy)]
pub struct FreshnessPolicy {
    window: Duration,
}

pub const DEFAULT_FRESHNESS_WINDOW_SECS: i64 = 600;

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            window: Duration::seconds(DEFAULT_FRESHNESS_WINDOW_SECS),
        }
    }
}

impl FreshnessPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn decide(
        &self,
        state: RecordState,
        fetched_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ServeDecision {
        match state {
            RecordState::Gone => ServeDecision {
                serve_cached: false,
                schedule_refresh: false,
            },
            // A refresh is already in flight, don't pile on.
            RecordState::Refreshing => ServeDecision {
                serve_cached: true,
                schedule_refresh: false,
            },
            RecordState::Stale => ServeDecision {
                serve_cached: true,
                schedule_refresh: true,
            },
            RecordState::Fresh => ServeDecision {
                serve_cached: true,
                schedule_refresh: now - fetched_at >= self.window,
            },
        }
    }
}
