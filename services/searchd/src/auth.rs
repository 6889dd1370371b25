use remotecache::{Authorizer, VideoPrivacy, VideoSummary};

/// Visibility gate at the authorization seam: public videos are visible
/// to everyone, anything else requires an authenticated caller. Full
/// token validation belongs to the platform's auth service; presence of
/// a token models that seam here.
pub struct TokenGateAuthorizer;

impl Authorizer for TokenGateAuthorizer {
    fn can_view(&self, payload: &VideoSummary, token: Option<&str>) -> bool {
        match payload.privacy.id {
            VideoPrivacy::Public => true,
            VideoPrivacy::Unlisted | VideoPrivacy::Private => token.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remotecache::{ChannelSummary, PrivacyLabel};
    use uuid::Uuid;

    fn video(privacy: VideoPrivacy) -> VideoSummary {
        VideoSummary {
            uuid: Uuid::new_v4(),
            name: "v".into(),
            channel: ChannelSummary {
                name: "c".into(),
                display_name: "c".into(),
            },
            privacy: PrivacyLabel { id: privacy },
            tags: vec![],
            duration_secs: 0,
        }
    }

    #[test]
    fn test_public_visible_without_token() {
        let auth = TokenGateAuthorizer;
        assert!(auth.can_view(&video(VideoPrivacy::Public), None));
        assert!(auth.can_view(&video(VideoPrivacy::Public), Some("tok")));
    }

    #[test]
    fn test_non_public_requires_token() {
        let auth = TokenGateAuthorizer;
        assert!(!auth.can_view(&video(VideoPrivacy::Unlisted), None));
        assert!(auth.can_view(&video(VideoPrivacy::Unlisted), Some("tok")));
        assert!(!auth.can_view(&video(VideoPrivacy::Private), None));
    }
}
