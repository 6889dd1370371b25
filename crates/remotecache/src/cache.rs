use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;
use videourl::CanonicalUri;

use crate::freshness::{Clock, FreshnessPolicy, ServeDecision};
use crate::types::{RecordState, RemoteVideoRecord, VideoSummary};

/// Cache of remote video projections keyed by canonical URI.
///
/// At most one record exists per URI. Mutations are atomic per key via
/// the map's entry locking; unrelated URIs never contend on a shared
/// lock.
pub struct RemoteVideoCache {
    entries: DashMap<CanonicalUri, RemoteVideoRecord>,
    policy: FreshnessPolicy,
    clock: Arc<dyn Clock>,
}

impl RemoteVideoCache {
    pub fn new(policy: FreshnessPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
            clock,
        }
    }

    pub fn get(&self, uri: &CanonicalUri) -> Option<RemoteVideoRecord> {
        self.entries.get(uri).map(|r| r.clone())
    }

    /// Read a record together with the freshness decision for it.
    pub fn read(&self, uri: &CanonicalUri) -> Option<(RemoteVideoRecord, ServeDecision)> {
        let record = self.get(uri)?;
        let decision = self
            .policy
            .decide(record.state, record.fetched_at, self.clock.now());
        Some((record, decision))
    }

    /// Install a freshly fetched payload. First insert assigns the local
    /// surrogate id; later calls replace the payload wholesale, bump
    /// `fetched_at` and reset the state to `Fresh`, keeping the id.
    pub fn upsert(&self, uri: &CanonicalUri, payload: VideoSummary) -> RemoteVideoRecord {
        let now = self.clock.now();
        match self.entries.entry(uri.clone()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                record.payload = payload;
                record.fetched_at = now;
                record.state = RecordState::Fresh;
                record.clone()
            }
            Entry::Vacant(vacant) => {
                let record = RemoteVideoRecord {
                    uri: uri.clone(),
                    local_id: Uuid::new_v4(),
                    payload,
                    fetched_at: now,
                    state: RecordState::Fresh,
                };
                vacant.insert(record.clone());
                record
            }
        }
    }

    /// Compare-and-transition into `Refreshing`. Returns `false` (no-op)
    /// when a refresh is already in flight, the record is gone, or there
    /// is nothing cached for this URI.
    pub fn mark_refreshing(&self, uri: &CanonicalUri) -> bool {
        match self.entries.get_mut(uri) {
            Some(mut record) => match record.state {
                RecordState::Refreshing | RecordState::Gone => false,
                RecordState::Fresh | RecordState::Stale => {
                    record.state = RecordState::Refreshing;
                    true
                }
            },
            None => false,
        }
    }

    /// Revert `Refreshing -> Stale` after a transient refresh failure,
    /// so the next qualifying read retries naturally.
    pub fn mark_stale(&self, uri: &CanonicalUri) {
        if let Some(mut record) = self.entries.get_mut(uri) {
            if record.state == RecordState::Refreshing {
                record.state = RecordState::Stale;
            }
        }
    }

    /// Tombstone then remove. In-flight holders of a cloned record keep
    /// seeing `Gone`; subsequent `get` calls see nothing.
    pub fn mark_gone(&self, uri: &CanonicalUri) {
        if let Some(mut record) = self.entries.get_mut(uri) {
            record.state = RecordState::Gone;
        }
        self.entries.remove(uri);
    }

    pub fn contains(&self, uri: &CanonicalUri) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
