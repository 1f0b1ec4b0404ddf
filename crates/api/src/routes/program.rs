//! Route definitions for programs and levels.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{level, program};
use crate::state::AppState;

/// Routes mounted at `/programs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(program::create))
        .route("/mine", get(program::list_mine))
        .route(
            "/{id}",
            get(program::get_by_id)
                .put(program::update)
                .delete(program::delete),
        )
}

/// Routes mounted at `/levels`.
pub fn level_router() -> Router<AppState> {
    Router::new()
        .route("/", post(level::create))
        .route("/{id}/activities", get(level::list_activities))
}
