use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use videourl::CanonicalUri;

use crate::types::{RefreshTask, VideoSummary};

/// Why a fetch could not produce a payload right now. Transient by
/// definition: the record stays eligible for a later retry.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("remote returned status {0}")]
    Status(u16),
    #[error("transport: {0}")]
    Transport(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Outcome of fetching a remote video's current representation.
/// "Object does not exist" is a value, not an error: it drives deletion
/// propagation rather than failure handling.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Payload(VideoSummary),
    NotFound,
    TransientError(FetchError),
}

/// Authenticated retrieval of a remote object. Idempotent and safe to
/// call concurrently for different URIs.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, uri: &CanonicalUri) -> FetchOutcome;
}

/// Fire-and-forget background work submission.
pub trait JobQueue: Send + Sync {
    fn enqueue(&self, task: RefreshTask);
}

/// The node's own source of truth, treated as a key-value lookup.
pub trait LocalStore: Send + Sync {
    fn lookup_local_video(&self, id: &Uuid) -> Option<VideoSummary>;

    /// Create the local placeholder rows a remote video needs (e.g. its
    /// channel), so later deletion has something concrete to cascade to.
    fn materialize_dependents(&self, uri: &CanonicalUri, payload: &VideoSummary);

    fn delete_dependent_rows(&self, uri: &CanonicalUri);
}

/// Visibility check, applied identically to cached and freshly fetched
/// payloads.
pub trait Authorizer: Send + Sync {
    fn can_view(&self, payload: &VideoSummary, token: Option<&str>) -> bool;
}
