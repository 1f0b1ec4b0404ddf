//! Route definitions for activities.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// Routes mounted at `/activities`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(activity::create))
        .route(
            "/{id}",
            get(activity::get_by_id)
                .put(activity::update)
                .delete(activity::delete),
        )
}
