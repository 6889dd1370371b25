//! Remote video cache
//!
//! Holds cached projections of videos that live on other nodes, keyed by
//! canonical URI, and keeps them eventually consistent with the origin:
//! stale entries are served immediately while a background refresh is
//! scheduled, at most one refresh is in flight per URI, and confirmed
//! remote deletions propagate to the cache and its dependent local rows.

mod cache;
mod capability;
mod deletion;
mod freshness;
mod refresh;
mod types;

pub use cache::RemoteVideoCache;
pub use capability::{Authorizer, FetchError, FetchOutcome, Fetcher, JobQueue, LocalStore};
pub use deletion::DeletionPropagator;
pub use freshness::{Clock, FreshnessPolicy, ManualClock, ServeDecision, SystemClock};
pub use refresh::RefreshCoordinator;
pub use types::{
    ChannelSummary, PrivacyLabel, RecordState, RefreshTask, RemoteVideoRecord, VideoPrivacy,
    VideoSummary,
};
