//! Handlers for the `/schedules` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;
use vitaplan_core::error::CoreError;
use vitaplan_core::types::DbId;
use vitaplan_db::models::schedule::{CreateSchedule, Schedule};
use vitaplan_db::repositories::{ActivityRepo, ProgramRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireExpert;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/schedules
///
/// Both parent program and activity must exist before the insert.
pub async fn create(
    State(state): State<AppState>,
    RequireExpert(_user): RequireExpert,
    Json(input): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<DataResponse<Schedule>>)> {
    input.validate()?;

    ProgramRepo::find_by_id(&state.pool, input.program_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id: input.program_id,
        }))?;
    ActivityRepo::find_by_id(&state.pool, input.activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: input.activity_id,
        }))?;

    let schedule = ScheduleRepo::insert(&state.pool, Uuid::new_v4(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: schedule })))
}

/// GET /api/v1/schedules/program/{program_id}
pub async fn list_by_program(
    State(state): State<AppState>,
    Path(program_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let schedules = ScheduleRepo::list_by_program(&state.pool, program_id).await?;
    Ok(Json(DataResponse { data: schedules }))
}
