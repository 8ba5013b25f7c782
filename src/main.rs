// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

use std::{env, net::SocketAddr};

use taskboard_server::{
    api::router,
    auth::JwksManager,
    config::{
        AUDIENCE_ENV, DATA_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_LOG_FILTER,
        DEFAULT_PORT, HOST_ENV, ISSUER_ENV, JWKS_URL_ENV, LOG_FORMAT_ENV, PORT_ENV, TASK_DB_FILE,
    },
    state::{AppState, AuthConfig},
    storage::TaskDatabase,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    // Open the embedded task database
    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let db_path = std::path::Path::new(&data_dir).join(TASK_DB_FILE);
    let db = TaskDatabase::open(&db_path).expect("Failed to open task database");
    tracing::info!(path = %db_path.display(), "task database opened");

    // Authentication mode: production (JWKS verification) or development
    let auth_config = match env::var(JWKS_URL_ENV) {
        Ok(jwks_url) => {
            tracing::info!(jwks_url = %jwks_url, "production auth mode (JWKS verification)");
            AuthConfig {
                jwks: Some(JwksManager::new(jwks_url)),
                issuer: env::var(ISSUER_ENV).ok(),
                audience: env::var(AUDIENCE_ENV).ok(),
            }
        }
        Err(_) => {
            tracing::warn!("development auth mode: tokens are NOT signature-verified");
            AuthConfig::default()
        }
    };

    let state = AppState::new(db).with_auth_config(auth_config);
    let app = router(state);

    // Parse bind address
    let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, "Taskboard server listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

/// Initialize tracing with the configured format and filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = env::var(LOG_FORMAT_ENV)
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolve when SIGINT is received, triggering graceful shutdown.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install SIGINT handler");
    tracing::info!("shutdown signal received");
}
