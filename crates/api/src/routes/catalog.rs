//! Route definitions for the disease and goal catalogs.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/diseases", get(catalog::list_diseases))
        .route("/goals", get(catalog::list_goals))
}
