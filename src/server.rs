//! Web front end.
//!
//! Every request to `/` or `/api/articles` runs a fresh aggregation and waits
//! for it to finish before responding; nothing is cached between requests.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | HTML dashboard |
//! | `GET /api/articles` | The [`Digest`] as JSON |
//! | `GET /health` | `ok` |

use crate::aggregator;
use crate::config::Config;
use crate::models::Digest;
use crate::outputs::html::render_dashboard;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use reqwest::Client;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Read-only state shared by all requests.
#[derive(Debug)]
pub struct AppState {
    pub client: Client,
    pub config: Config,
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/articles", get(articles))
        .route("/health", get(health_check))
        .with_state(state)
}

#[instrument(level = "info", skip_all)]
async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let digest = aggregator::collect(&state.client, &state.config).await;
    Html(render_dashboard(&digest, Local::now()))
}

#[instrument(level = "info", skip_all)]
async fn articles(State(state): State<Arc<AppState>>) -> Json<Digest> {
    Json(aggregator::collect(&state.client, &state.config).await)
}

async fn health_check() -> &'static str {
    "ok"
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Dashboard listening");
    axum::serve(listener, routes(state)).await?;
    Ok(())
}
