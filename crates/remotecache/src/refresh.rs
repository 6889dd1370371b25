use std::sync::Arc;

use tracing::{debug, info, warn};
use videourl::CanonicalUri;

use crate::cache::RemoteVideoCache;
use crate::capability::{FetchOutcome, Fetcher, JobQueue, LocalStore};
use crate::deletion::DeletionPropagator;
use crate::freshness::Clock;
use crate::types::RefreshTask;

/// Schedules and executes background refreshes, with at-most-one in
/// flight per URI.
///
/// No retry loop lives here: a transient failure leaves the record
/// `Stale`, and the next qualifying read re-triggers the refresh. Query
/// traffic itself bounds the retry rate.
pub struct RefreshCoordinator {
    cache: Arc<RemoteVideoCache>,
    fetcher: Arc<dyn Fetcher>,
    queue: Arc<dyn JobQueue>,
    local: Arc<dyn LocalStore>,
    deletion: Arc<DeletionPropagator>,
    clock: Arc<dyn Clock>,
}

impl RefreshCoordinator {
    pub fn new(
        cache: Arc<RemoteVideoCache>,
        fetcher: Arc<dyn Fetcher>,
        queue: Arc<dyn JobQueue>,
        local: Arc<dyn LocalStore>,
        deletion: Arc<DeletionPropagator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            queue,
            local,
            deletion,
            clock,
        }
    }

    /// Called after a read that found the record stale. Wins the per-key
    /// compare-and-transition or does nothing; either way the caller
    /// keeps serving the cached payload and never waits.
    pub fn maybe_refresh(&self, uri: &CanonicalUri) {
        if !self.cache.mark_refreshing(uri) {
            debug!(uri = %uri, "refresh: already in flight, coalescing");
            return;
        }

        self.queue.enqueue(RefreshTask {
            uri: uri.clone(),
            requested_at: self.clock.now(),
        });
    }

    /// Executed out of band by the job worker.
    pub async fn run_refresh(&self, uri: &CanonicalUri) {
        match self.fetcher.fetch(uri).await {
            FetchOutcome::Payload(payload) => {
                self.local.materialize_dependents(uri, &payload);
                let record = self.cache.upsert(uri, payload);
                info!(uri = %uri, local_id = %record.local_id, "refresh: updated from origin");
            }
            FetchOutcome::NotFound => {
                self.deletion.propagate(uri);
            }
            FetchOutcome::TransientError(err) => {
                warn!(uri = %uri, "refresh: transient failure, will retry on next read: {err}");
                self.cache.mark_stale(uri);
            }
        }
    }
}
