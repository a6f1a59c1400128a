//! Carbon MRV Backend - sign-up / sign-in API for the MRV dashboard.
//!
//! Serves the account endpoints over HTTP with a SQLite credential store
//! and an in-memory mock store that keeps the demo running when the
//! database is unreachable.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carbon_mrv_backend::{
    auth::{api as auth_api, AuthState, MemoryAccountStore, PasswordHasher, SqliteAccountStore, StoreChain},
    config::Config,
    middleware::request_logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let config = Config::from_env();
    info!("🌱 Carbon MRV backend starting");

    let primary = Arc::new(SqliteAccountStore::new(&config.db_path));
    let fallback = Arc::new(MemoryAccountStore::new());
    let chain = Arc::new(StoreChain::new(primary, fallback));

    // One startup probe so the store mode is visible in the logs; the
    // /health endpoint reports it afterwards.
    if chain.health().primary_available {
        info!("📦 Connected to account database at {}", config.db_path);
    } else {
        warn!("⚠️  Account database unavailable - requests will use the in-memory mock store");
    }

    let state = AuthState::new(chain, PasswordHasher::new());

    let app = Router::new()
        .merge(auth_api::routes(state))
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("🎯 API server listening on {}", config.listen_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carbon_mrv_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
