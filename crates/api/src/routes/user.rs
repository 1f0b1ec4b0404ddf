//! Route definitions for user-facing participation.

use axum::routing::post;
use axum::Router;

use crate::handlers::participation;
use crate::state::AppState;

/// Routes mounted at `/user`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/programs/enroll", post(participation::enroll))
        .route(
            "/activities/{id}/status",
            post(participation::record_activity),
        )
}
