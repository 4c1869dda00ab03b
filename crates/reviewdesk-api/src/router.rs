use crate::{
    handlers::{index, pr_detail},
    health::health,
    reply::add_reply,
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/pr/{number}", get(pr_detail))
        .route("/pr/{number}/reply", post(add_reply))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
