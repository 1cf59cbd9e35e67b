// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Webmention Receiver Service
//!
//! Accepts Webmention submissions for the chyrp blog backend, verifies
//! that the claimed source actually links to the claimed target, and
//! records the mention against the local post it resolves to.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `MONGODB_URI`: Document store URI, or `memory` (default: mongodb://localhost:27017/app_data)
//! - `TARGET_PREFIX`: Local post-URL prefix (default: http://localhost:3000/posts/)
//! - `FETCH_TIMEOUT_SECS`: Source fetch timeout (default: 10)

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use webmention_receiver::{
    config::Config,
    fetch::HttpFetcher,
    handlers::{health, list_webmentions, receive_webmention, AppState},
    store::{MemoryStore, MentionStore, MongoStore},
    WebmentionReceiver,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        target_prefix = %config.target_prefix,
        fetch_timeout_secs = config.fetch_timeout_secs,
        "Starting Webmention receiver"
    );

    // Connect the document store
    let store: Arc<dyn MentionStore> = if config.mongodb_uri == "memory" {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(MongoStore::connect(&config.mongodb_uri).await?)
    };

    // Create application state
    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout())?);
    let receiver = WebmentionReceiver::new(store.clone(), fetcher, config.target_prefix.clone());

    let state = Arc::new(AppState { receiver, store });

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/webmention", post(receive_webmention))
        .route("/posts/:post_id/webmentions", get(list_webmentions))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
