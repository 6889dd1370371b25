//! Video URL classification
//!
//! Decides whether a search string names a video on some node, and if so
//! normalizes it to a canonical identity. A video has two accepted watch
//! URL shapes (`/videos/watch/<uuid>` and the `/w/<uuid>` alias); both
//! must resolve to the same `CanonicalUri`.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Normalized identity of a video resource, independent of which literal
/// watch URL form named it. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalUri {
    pub host: String,
    pub port: u16,
    pub id: Uuid,
}

impl CanonicalUri {
    pub fn new(host: impl Into<String>, port: u16, id: Uuid) -> Self {
        Self {
            host: host.into(),
            port,
            id,
        }
    }

    /// Long-form watch URL for this video, suitable for fetching the
    /// remote representation.
    ///
    /// The scheme is not part of the canonical identity (both literal
    /// forms of a URL must collapse to one key), so it is reconstructed
    /// from the port: 443 means https, anything else http. Nodes
    /// serving https on a non-standard port are not reachable through
    /// this convention.
    pub fn watch_url(&self) -> String {
        let scheme = if self.port == 443 { "https" } else { "http" };
        format!(
            "{}://{}:{}/videos/watch/{}",
            scheme, self.host, self.port, self.id
        )
    }
}

impl fmt::Display for CanonicalUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.id)
    }
}

/// Classify a raw search string.
///
/// Returns `Some` only for http(s) URLs whose path is one of the two
/// accepted watch shapes with a well-formed UUID identifier. Everything
/// else (keyword queries, malformed URLs, other paths) is a non-match,
/// not an error. Query strings and fragments on the watch URL are
/// tolerated and stripped.
pub fn classify(query: &str) -> Option<CanonicalUri> {
    let parsed = Url::parse(query.trim()).ok()?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?.to_string();
    let port = parsed.port_or_known_default()?;

    // Empty segments absorb trailing slashes.
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    let raw_id = match segments.as_slice() {
        ["videos", "watch", id] => *id,
        ["w", id] => *id,
        _ => return None,
    };

    let id = Uuid::parse_str(raw_id).ok()?;
    Some(CanonicalUri { host, port, id })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid() -> Uuid {
        Uuid::parse_str("9c9de5e8-0a1e-484a-b099-e80d52ff4b41").unwrap()
    }

    #[test]
    fn test_classify_long_form() {
        let uri = classify(&format!("http://peertube.example:9001/videos/watch/{}", uuid()))
            .expect("should classify");
        assert_eq!(uri.host, "peertube.example");
        assert_eq!(uri.port, 9001);
        assert_eq!(uri.id, uuid());
    }

    #[test]
    fn test_short_alias_normalizes_to_same_uri() {
        let long = classify(&format!("http://node.example:9001/videos/watch/{}", uuid()));
        let short = classify(&format!("http://node.example:9001/w/{}", uuid()));
        assert_eq!(long, short);
        assert!(long.is_some());
    }

    #[test]
    fn test_default_ports() {
        let http = classify(&format!("http://node.example/w/{}", uuid())).unwrap();
        assert_eq!(http.port, 80);
        let https = classify(&format!("https://node.example/w/{}", uuid())).unwrap();
        assert_eq!(https.port, 443);
    }

    #[test]
    fn test_tolerates_trailing_slash_and_query() {
        let plain = classify(&format!("http://n.example:9001/videos/watch/{}", uuid()));
        let noisy = classify(&format!(
            "http://n.example:9001/videos/watch/{}/?start=3s#comments",
            uuid()
        ));
        assert_eq!(plain, noisy);
        assert!(plain.is_some());
    }

    #[test]
    fn test_rejects_non_url_and_wrong_shapes() {
        assert_eq!(classify("cat videos"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("http://node.example:9001/accounts/root"), None);
        assert_eq!(
            classify(&format!("http://node.example:9001/videos/{}", uuid())),
            None
        );
        assert_eq!(
            classify(&format!("ftp://node.example:9001/videos/watch/{}", uuid())),
            None
        );
    }

    #[test]
    fn test_rejects_non_uuid_identifier() {
        assert_eq!(classify("http://node.example:9001/videos/watch/43"), None);
        assert_eq!(classify("http://node.example:9001/w/not-a-uuid"), None);
    }

    #[test]
    fn test_watch_url_round_trips() {
        let uri = CanonicalUri::new("node.example", 9001, uuid());
        assert_eq!(classify(&uri.watch_url()), Some(uri));
    }

    #[test]
    fn test_watch_url_scheme_follows_port() {
        let standard = CanonicalUri::new("node.example", 443, uuid());
        assert!(standard.watch_url().starts_with("https://"));

        let custom = CanonicalUri::new("node.example", 9001, uuid());
        assert!(custom.watch_url().starts_with("http://"));

        // An https origin classified without an explicit port lands on
        // 443 and round-trips back to https.
        let classified = classify(&format!("https://node.example/w/{}", uuid())).unwrap();
        assert_eq!(classify(&classified.watch_url()), Some(classified));
    }
}
