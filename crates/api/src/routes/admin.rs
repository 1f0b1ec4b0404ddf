//! Route definitions for admin account management.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            get(admin::list_accounts).post(admin::create_account),
        )
        .route("/accounts/{id}/lock", patch(admin::lock_account))
        .route("/accounts/{id}/unlock", patch(admin::unlock_account))
}
