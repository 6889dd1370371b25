use dashmap::DashMap;
use remotecache::{LocalStore, VideoSummary};
use tracing::debug;
use uuid::Uuid;
use videourl::CanonicalUri;

/// In-memory stand-in for the node's own store, keyed the way the
/// capability contract sees it: videos by identifier, plus the
/// placeholder channel rows materialized for remote videos so their
/// channel relationship has something to point at.
#[derive(Default)]
pub struct InMemoryLocalStore {
    videos: DashMap<Uuid, VideoSummary>,
    placeholder_channels: DashMap<CanonicalUri, String>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_video(&self, video: VideoSummary) {
        self.videos.insert(video.uuid, video);
    }

    pub fn placeholder_channel(&self, uri: &CanonicalUri) -> Option<String> {
        self.placeholder_channels.get(uri).map(|c| c.clone())
    }
}

impl LocalStore for InMemoryLocalStore {
    fn lookup_local_video(&self, id: &Uuid) -> Option<VideoSummary> {
        self.videos.get(id).map(|v| v.clone())
    }

    fn materialize_dependents(&self, uri: &CanonicalUri, payload: &VideoSummary) {
        self.placeholder_channels
            .insert(uri.clone(), payload.channel.name.clone());
    }

    fn delete_dependent_rows(&self, uri: &CanonicalUri) {
        if self.placeholder_channels.remove(uri).is_some() {
            debug!(uri = %uri, "local store: dropped placeholder channel row");
        }
    }
}
