//! Handlers for user-facing enrollment and activity tracking.
//!
//! These write the participation rows the composer's delete gate counts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vitaplan_core::enums::ParticipationStatus;
use vitaplan_core::error::CoreError;
use vitaplan_core::types::DbId;
use vitaplan_db::models::participation::{EnrollProgram, UserActivity, UserProgram};
use vitaplan_db::repositories::{ActivityRepo, LevelRepo, ParticipationRepo, ProgramRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordActivityRequest {
    /// One of `pending`, `complete`, `skip`.
    pub status: String,
}

/// POST /api/v1/user/programs/enroll
///
/// Enrolls the acting user into an active program at one of its levels.
pub async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<EnrollProgram>,
) -> AppResult<(StatusCode, Json<DataResponse<UserProgram>>)> {
    let program = ProgramRepo::find_by_id(&state.pool, input.program_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id: input.program_id,
        }))?;
    if !program.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Program is not active".into(),
        )));
    }

    let level = LevelRepo::find_by_id(&state.pool, input.level_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Level",
            id: input.level_id,
        }))?;
    if level.program_id != program.program_id {
        return Err(AppError::Core(CoreError::Validation(
            "Level does not belong to this program".into(),
        )));
    }

    let enrollment = ParticipationRepo::enroll(&state.pool, user.account_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: enrollment })))
}

/// POST /api/v1/user/activities/{id}/status
///
/// Records the acting user's status for an activity.
pub async fn record_activity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(activity_id): Path<DbId>,
    Json(input): Json<RecordActivityRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserActivity>>)> {
    ActivityRepo::find_by_id(&state.pool, activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    let status = ParticipationStatus::parse(&input.status).map_err(AppError::Core)?;
    let record =
        ParticipationRepo::record_activity(&state.pool, user.account_id, activity_id, status)
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}
