use std::sync::Arc;

use tracing::info;
use videourl::CanonicalUri;

use crate::cache::RemoteVideoCache;
use crate::capability::LocalStore;

/// Removes a remote video the origin no longer has: the cached record
/// and the local rows that only existed to represent its dependents
/// (placeholder channel rows and the like).
pub struct DeletionPropagator {
    cache: Arc<RemoteVideoCache>,
    local: Arc<dyn LocalStore>,
}

impl DeletionPropagator {
    pub fn new(cache: Arc<RemoteVideoCache>, local: Arc<dyn LocalStore>) -> Self {
        Self { cache, local }
    }

    /// After this returns, `get(uri)` is absent; the façade answers with
    /// an empty result set, not an error.
    pub fn propagate(&self, uri: &CanonicalUri) {
        info!(uri = %uri, "deletion: remote origin no longer has object, removing");
        self.local.delete_dependent_rows(uri);
        self.cache.mark_gone(uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::{FreshnessPolicy, ManualClock};
    use crate::types::{ChannelSummary, PrivacyLabel, VideoPrivacy, VideoSummary};
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    struct RecordingStore {
        deleted: Mutex<Vec<CanonicalUri>>,
    }

    impl LocalStore for RecordingStore {
        fn lookup_local_video(&self, _id: &Uuid) -> Option<VideoSummary> {
            None
        }

        fn materialize_dependents(&self, _uri: &CanonicalUri, _payload: &VideoSummary) {}

        fn delete_dependent_rows(&self, uri: &CanonicalUri) {
            self.deleted.lock().unwrap().push(uri.clone());
        }
    }

    #[test]
    fn test_propagate_removes_record_and_dependents() {
        let clock = Arc::new(ManualClock::new(
            DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let cache = Arc::new(RemoteVideoCache::new(FreshnessPolicy::default(), clock));
        let store = Arc::new(RecordingStore {
            deleted: Mutex::new(Vec::new()),
        });

        let uri = CanonicalUri::new("remote.example", 9002, Uuid::new_v4());
        cache.upsert(
            &uri,
            VideoSummary {
                uuid: uri.id,
                name: "doomed".into(),
                channel: ChannelSummary {
                    name: "c".into(),
                    display_name: "c".into(),
                },
                privacy: PrivacyLabel {
                    id: VideoPrivacy::Public,
                },
                tags: vec![],
                duration_secs: 0,
            },
        );

        let propagator = DeletionPropagator::new(cache.clone(), store.clone());
        propagator.propagate(&uri);

        assert!(cache.get(&uri).is_none());
        assert_eq!(store.deleted.lock().unwrap().as_slice(), &[uri]);
    }
}
