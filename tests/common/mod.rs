#![allow(dead_code)]

use alias_shortener::api::handlers::health_handler;
use alias_shortener::api::routes::api_routes;
use alias_shortener::routes::app_router;
use alias_shortener::domain::click_event::ClickEvent;
use alias_shortener::domain::repositories::{ClickRepository, LinkRepository};
use alias_shortener::infrastructure::cache::{CacheService, InMemoryCache};
use alias_shortener::infrastructure::persistence::{InMemoryClickRepository, InMemoryLinkRepository};
use alias_shortener::state::{AppState, CoreSettings};
use axum::Router;
use axum::extract::connect_info::MockConnectInfo;
use axum::routing::get;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Handles a test keeps besides the server.
pub struct TestContext {
    pub server: TestServer,
    pub links: Arc<InMemoryLinkRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
    pub cache: Arc<InMemoryCache>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_state(
    queue_capacity: usize,
) -> (
    AppState,
    Arc<InMemoryLinkRepository>,
    Arc<InMemoryClickRepository>,
    Arc<InMemoryCache>,
    mpsc::Receiver<ClickEvent>,
) {
    let links = Arc::new(InMemoryLinkRepository::new());
    let clicks = Arc::new(InMemoryClickRepository::new());
    let cache = Arc::new(InMemoryCache::new());
    let (tx, rx) = mpsc::channel(queue_capacity);

    let link_store: Arc<dyn LinkRepository> = links.clone();
    let click_store: Arc<dyn ClickRepository> = clicks.clone();
    let cache_service: Arc<dyn CacheService> = cache.clone();

    let state = AppState::new(
        link_store,
        click_store,
        cache_service,
        tx,
        CoreSettings::default(),
    );

    (state, links, clicks, cache, rx)
}

pub fn test_router(state: AppState) -> Router {
    let addr: SocketAddr = PEER_ADDR.parse().unwrap();
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(MockConnectInfo(addr))
}

/// Full production router, middleware included.
pub fn app_test_router(state: AppState, request_timeout: Duration) -> Router {
    let addr: SocketAddr = PEER_ADDR.parse().unwrap();
    Router::new()
        .fallback_service(app_router(state, request_timeout))
        .layer(MockConnectInfo(addr))
}

pub fn create_test_context() -> TestContext {
    create_test_context_with_queue(100)
}

pub fn create_test_context_with_queue(queue_capacity: usize) -> TestContext {
    let (state, links, clicks, cache, click_rx) = create_test_state(queue_capacity);
    let server = TestServer::new(test_router(state)).unwrap();

    TestContext {
        server,
        links,
        clicks,
        cache,
        click_rx,
    }
}
