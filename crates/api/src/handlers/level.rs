//! Handlers for the `/levels` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vitaplan_core::types::DbId;
use vitaplan_db::composer::ProgramComposer;
use vitaplan_db::models::activity::Activity;
use vitaplan_db::models::level::{CreateLevelRequest, Level};
use vitaplan_db::repositories::ActivityRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireExpert;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/levels
///
/// Creates a level under an existing program (404 if the program is
/// missing).
pub async fn create(
    State(state): State<AppState>,
    RequireExpert(_user): RequireExpert,
    Json(input): Json<CreateLevelRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Level>>)> {
    input.validate()?;
    let level = ProgramComposer::create_level(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: level })))
}

/// GET /api/v1/levels/{id}/activities
pub async fn list_activities(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Activity>>>> {
    let activities = ActivityRepo::list_by_level(&state.pool, id).await?;
    Ok(Json(DataResponse { data: activities }))
}
