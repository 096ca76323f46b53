//! Rating Board API Server
//!
//! Ingests contest-result webhooks from online-judge bots and maintains a
//! tabular rating board: one standings sheet per contest plus a cumulative
//! leaderboard. Uses hexagonal (ports & adapters) architecture; the hosting
//! spreadsheet runtime sits behind the `TabularStore` port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::InMemoryTabularStore;
use app::DispatchService;
use config::{BoardConfig, Config};
use domain::ports::{CellValue, TabularStore};
use domain::schema::BoardSchema;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatch: Arc<DispatchService<InMemoryTabularStore>>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Make sure the workbook carries the cumulative table and the coefficient
/// config sheet before the first webhook arrives.
async fn bootstrap_board(store: &InMemoryTabularStore, board: &BoardConfig) -> anyhow::Result<()> {
    if !store.sheet_exists(&board.table_name).await? {
        store.create_sheet(&board.table_name).await?;
        let schema = BoardSchema::new(board.judges.clone());
        store
            .set_value(
                &board.table_name,
                BoardSchema::LINK_ROW,
                schema.total_col(),
                CellValue::Text("Total".to_string()),
            )
            .await?;
        tracing::warn!(
            table = board.table_name.as_str(),
            "Cumulative table not found, created an empty one"
        );
    }
    if !store.sheet_exists(&board.config_sheet).await? {
        store.create_sheet(&board.config_sheet).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ratingboard_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rating Board API...");

    // Load configuration
    let config = Config::from_env();
    let board = Arc::new(config.board.clone());

    // Create the store adapter and seed the board sheets
    let store = Arc::new(InMemoryTabularStore::new());
    bootstrap_board(&store, &board)
        .await
        .expect("Failed to prepare the board sheets");

    // Create the engine behind its single dispatch lock
    let dispatch = Arc::new(DispatchService::new(store.clone(), board.clone()));

    let state = AppState {
        dispatch,
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Webhook ingress (signature-verified, rate-limited)
    let webhook_routes = Router::new()
        .route("/webhooks/judge", post(handlers::judge_webhook))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(webhook_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
