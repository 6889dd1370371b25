use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use videourl::CanonicalUri;

/// Video privacy levels, numbered as exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VideoPrivacy {
    Public = 1,
    Unlisted = 2,
    Private = 3,
}

impl From<VideoPrivacy> for u8 {
    fn from(p: VideoPrivacy) -> u8 {
        p as u8
    }
}

impl TryFrom<u8> for VideoPrivacy {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(VideoPrivacy::Public),
            2 => Ok(VideoPrivacy::Unlisted),
            3 => Ok(VideoPrivacy::Private),
            other => Err(format!("unknown privacy id: {other}")),
        }
    }
}

/// Wire shape is `{"id": n}`, matching how clients read `privacy.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyLabel {
    pub id: VideoPrivacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub name: String,
    pub display_name: String,
}

/// Denormalized video attributes needed for search display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub uuid: Uuid,
    pub name: String,
    pub channel: ChannelSummary,
    pub privacy: PrivacyLabel,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub duration_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordState {
    Fresh,
    Stale,
    Refreshing,
    Gone,
}

/// Cached projection of a remote video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteVideoRecord {
    pub uri: CanonicalUri,
    /// Local surrogate id, assigned on first fetch and stable across
    /// refreshes.
    pub local_id: Uuid,
    pub payload: VideoSummary,
    pub fetched_at: DateTime<Utc>,
    pub state: RecordState,
}

/// Unit of background work handed to the job capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshTask {
    pub uri: CanonicalUri,
    pub requested_at: DateTime<Utc>,
}
