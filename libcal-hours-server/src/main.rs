//! libcal-hours-server - serves embeddable opening-hours tables
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 4097)
//! - `RUST_LOG`: Log filter (default: info)
//! - `LIBCAL_HOURS_*`: Overrides for config file keys

mod routes;
mod state;

use std::env;
use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use libcal_hours_core::HoursSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

const DEFAULT_PORT: u16 = 4097;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let state = AppState::from_config()?;

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    info!("libcal-hours-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app<S>(state: AppState<S>) -> Router
where
    S: HoursSource + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::hours::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
