//! Handlers for the `/activities` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vitaplan_core::error::CoreError;
use vitaplan_core::types::DbId;
use vitaplan_db::composer::ProgramComposer;
use vitaplan_db::models::activity::{
    ActivityWithRepeatDays, CreateActivityRequest, UpdateActivityRequest,
};
use vitaplan_db::repositories::{ActivityRepo, RepeatDayRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::program::DeleteResponse;
use crate::middleware::rbac::RequireExpert;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/activities
///
/// Creates an activity with its repeat days in one transaction; invalid
/// enum input rolls everything back.
pub async fn create(
    State(state): State<AppState>,
    RequireExpert(_user): RequireExpert,
    Json(input): Json<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ActivityWithRepeatDays>>)> {
    input.validate()?;
    let created = ProgramComposer::create_activity(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/activities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ActivityWithRepeatDays>>> {
    let activity = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))?;
    let repeat_days = RepeatDayRepo::list_by_activity(&state.pool, id)
        .await?
        .into_iter()
        .map(|d| d.repeat_day)
        .collect();
    Ok(Json(DataResponse {
        data: ActivityWithRepeatDays {
            activity,
            repeat_days,
        },
    }))
}

/// PUT /api/v1/activities/{id}
///
/// Patches scalars and replaces the repeat-day set atomically.
pub async fn update(
    State(state): State<AppState>,
    RequireExpert(_user): RequireExpert,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivityRequest>,
) -> AppResult<Json<DataResponse<ActivityWithRepeatDays>>> {
    input.validate()?;
    let updated = ProgramComposer::update_activity(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/activities/{id}
///
/// Deactivates when participants have recorded the activity, hard-deletes
/// (with repeat days) otherwise.
pub async fn delete(
    State(state): State<AppState>,
    RequireExpert(_user): RequireExpert,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteResponse>>> {
    let outcome = ProgramComposer::delete_activity(&state.pool, id).await?;
    Ok(Json(DataResponse { data: outcome.into() }))
}
