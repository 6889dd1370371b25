use axum::extract::{Query, State};
use axum::http::header;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::facade::ResultSet;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: String,
    pub token: Option<String>,
}

/// `GET /api/v1/search/videos?search=...` — always 200 with
/// `{total, data}`; a remote that is unreachable or has nothing both
/// look like "no results" to the caller.
pub async fn search_videos(
    State(state): State<SharedState>,
    Query(q): Query<SearchQuery>,
    headers: HeaderMap,
) -> Json<ResultSet> {
    let bearer = bearer_token(&headers);
    let token = bearer.as_deref().or(q.token.as_deref());

    Json(state.facade.search(&q.search, token).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));

        headers.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
