//! Route definitions for experts.

use axum::routing::get;
use axum::Router;

use crate::handlers::expert;
use crate::state::AppState;

/// Routes mounted at `/experts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expert::list).post(expert::create))
        .route(
            "/{id}",
            get(expert::get_by_id)
                .put(expert::update)
                .delete(expert::delete),
        )
}
