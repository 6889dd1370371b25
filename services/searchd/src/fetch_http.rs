use std::time::Duration;

use async_trait::async_trait;
use remotecache::{FetchError, FetchOutcome, Fetcher, VideoSummary};
use reqwest::{header, StatusCode};
use videourl::CanonicalUri;

/// Fetches a remote video's current representation from its origin node.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &CanonicalUri) -> FetchOutcome {
        let url = uri.watch_url();

        let resp = match self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return FetchOutcome::TransientError(FetchError::Transport(e.to_string())),
        };

        match resp.status() {
            s if s.is_success() => match resp.json::<VideoSummary>().await {
                Ok(payload) => FetchOutcome::Payload(payload),
                Err(e) => {
                    FetchOutcome::TransientError(FetchError::InvalidPayload(e.to_string()))
                }
            },
            StatusCode::NOT_FOUND | StatusCode::GONE => FetchOutcome::NotFound,
            s => FetchOutcome::TransientError(FetchError::Status(s.as_u16())),
        }
    }
}
