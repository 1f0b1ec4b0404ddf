//! Route definitions for the acting user's profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(profile::get_me)
            .post(profile::create)
            .put(profile::update),
    )
}
