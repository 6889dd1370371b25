mod auth;
mod config;
mod facade;
mod fetch_http;
mod local;
mod routes_search;
mod state;
mod worker_loop;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use chrono::Duration as ChronoDuration;
use remotecache::{
    DeletionPropagator, FreshnessPolicy, RefreshCoordinator, RemoteVideoCache, SystemClock,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::TokenGateAuthorizer;
use crate::config::AppConfig;
use crate::facade::SearchFacade;
use crate::fetch_http::HttpFetcher;
use crate::local::InMemoryLocalStore;
use crate::state::AppState;
use crate::worker_loop::{run_refresh_worker, ChannelJobQueue};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let clock = Arc::new(SystemClock);
    let policy = FreshnessPolicy::new(ChronoDuration::seconds(cfg.freshness_window_secs as i64));
    let cache = Arc::new(RemoteVideoCache::new(policy, clock.clone()));

    let fetcher = Arc::new(
        HttpFetcher::new(Duration::from_secs(cfg.fetch_timeout_secs))
            .context("Failed to build HTTP fetcher")?,
    );
    let local = Arc::new(InMemoryLocalStore::new());
    let deletion = Arc::new(DeletionPropagator::new(cache.clone(), local.clone()));

    let (queue, rx) = ChannelJobQueue::new();
    let coordinator = Arc::new(RefreshCoordinator::new(
        cache.clone(),
        fetcher.clone(),
        Arc::new(queue),
        local.clone(),
        deletion,
        clock,
    ));

    tokio::spawn(run_refresh_worker(rx, coordinator.clone()));

    let facade = SearchFacade::new(
        cfg.host.clone(),
        cfg.port,
        cache,
        coordinator,
        fetcher,
        local,
        Arc::new(TokenGateAuthorizer),
    );

    let app_state = Arc::new(AppState::new(facade));

    let app = Router::new()
        .route("/api/v1/search/videos", get(routes_search::search_videos))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    info!(origin = %format!("{}:{}", cfg.host, cfg.port), "searchd: advertised origin");
    println!("searchd listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .context("Failed to bind")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
