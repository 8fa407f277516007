pub mod audio;
pub mod audit;
pub mod health;
pub mod query;
pub mod types;

use axum::routing::{get, post};
use axum::Router;

use crate::server::state::AppState;

/// Build the API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/query", post(query::handler))
        .route("/query/audio", post(audio::handler))
        .route("/audit", get(audit::handler))
        .route("/health", get(health::handler))
}
