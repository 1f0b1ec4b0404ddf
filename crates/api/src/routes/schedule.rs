//! Route definitions for schedules.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(schedule::create))
        .route("/program/{program_id}", get(schedule::list_by_program))
}
