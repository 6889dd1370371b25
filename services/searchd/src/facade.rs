use std::sync::Arc;

use remotecache::{
    Authorizer, FetchOutcome, Fetcher, LocalStore, RefreshCoordinator, RemoteVideoCache,
    VideoSummary,
};
use serde::Serialize;
use tracing::{debug, warn};
use videourl::{classify, CanonicalUri};

#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    pub total: usize,
    pub data: Vec<VideoSummary>,
}

impl ResultSet {
    pub fn empty() -> Self {
        Self {
            total: 0,
            data: Vec::new(),
        }
    }

    fn single(video: VideoSummary) -> Self {
        Self {
            total: 1,
            data: vec![video],
        }
    }
}

/// Orchestrates classification, local lookup, cache reads and refresh
/// scheduling for URI-shaped search queries.
///
/// Failure policy: a remote that is unreachable and a remote that has
/// nothing both degrade to an empty result set. Infrastructure state is
/// never surfaced to the search caller.
pub struct SearchFacade {
    own_host: String,
    own_port: u16,
    cache: Arc<RemoteVideoCache>,
    coordinator: Arc<RefreshCoordinator>,
    fetcher: Arc<dyn Fetcher>,
    local: Arc<dyn LocalStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl SearchFacade {
    pub fn new(
        own_host: String,
        own_port: u16,
        cache: Arc<RemoteVideoCache>,
        coordinator: Arc<RefreshCoordinator>,
        fetcher: Arc<dyn Fetcher>,
        local: Arc<dyn LocalStore>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            own_host,
            own_port,
            cache,
            coordinator,
            fetcher,
            local,
            authorizer,
        }
    }

    pub async fn search(&self, query: &str, token: Option<&str>) -> ResultSet {
        let Some(uri) = classify(query) else {
            // Not URI-shaped; the keyword index handles it, not us.
            return ResultSet::empty();
        };

        if self.is_local(&uri) {
            return self.search_local(&uri, token);
        }
        self.search_remote(&uri, token).await
    }

    fn is_local(&self, uri: &CanonicalUri) -> bool {
        uri.host == self.own_host && uri.port == self.own_port
    }

    /// Authoritative path: always re-read from the local source of
    /// truth, never cached, never refreshed. A missing local id must not
    /// provoke a fetch against ourselves.
    fn search_local(&self, uri: &CanonicalUri, token: Option<&str>) -> ResultSet {
        match self.local.lookup_local_video(&uri.id) {
            Some(video) if self.authorizer.can_view(&video, token) => ResultSet::single(video),
            _ => ResultSet::empty(),
        }
    }

    async fn search_remote(&self, uri: &CanonicalUri, token: Option<&str>) -> ResultSet {
        if let Some((record, decision)) = self.cache.read(uri) {
            if decision.schedule_refresh {
                self.coordinator.maybe_refresh(uri);
            }
            if decision.serve_cached {
                return self.gated(record.payload, token);
            }
            // Gone: fall through to a fresh attempt, which confirms the
            // deletion (404) or resurrects the object.
        }

        // Nothing cached yet: the one place the read path blocks on the
        // network.
        match self.fetcher.fetch(uri).await {
            FetchOutcome::Payload(payload) => {
                self.local.materialize_dependents(uri, &payload);
                let record = self.cache.upsert(uri, payload);
                debug!(uri = %uri, local_id = %record.local_id, "search: first fetch cached");
                self.gated(record.payload, token)
            }
            FetchOutcome::NotFound => ResultSet::empty(),
            FetchOutcome::TransientError(err) => {
                warn!(uri = %uri, "search: remote unreachable, degrading to empty: {err}");
                ResultSet::empty()
            }
        }
    }

    fn gated(&self, payload: VideoSummary, token: Option<&str>) -> ResultSet {
        if self.authorizer.can_view(&payload, token) {
            ResultSet::single(payload)
        } else {
            ResultSet::empty()
        }
    }
}
