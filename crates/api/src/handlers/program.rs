//! Handlers for the `/programs` resource.
//!
//! Handlers stay thin: the transactional tree workflows (and the
//! ownership/participation gates) live in
//! [`vitaplan_db::composer::ProgramComposer`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;
use vitaplan_core::paging::Paging;
use vitaplan_core::types::DbId;
use vitaplan_db::composer::{DeleteOutcome, ProgramComposer};
use vitaplan_db::models::program::{
    CreateProgramRequest, Program, ProgramWithTree, UpdateProgramRequest,
};
use vitaplan_db::repositories::ProgramRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireExpert;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// Outcome of a participation-gated delete, shaped for JSON.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub outcome: &'static str,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        let outcome = match outcome {
            DeleteOutcome::Deactivated => "deactivated",
            DeleteOutcome::Deleted => "deleted",
        };
        Self { outcome }
    }
}

/// POST /api/v1/programs
///
/// Creates a program with its full tree in one transaction.
pub async fn create(
    State(state): State<AppState>,
    RequireExpert(user): RequireExpert,
    Json(input): Json<CreateProgramRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Program>>)> {
    input.validate()?;
    let program = ProgramComposer::create_program(&state.pool, user.account_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: program })))
}

/// GET /api/v1/programs/mine
///
/// Programs created by the acting expert, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireExpert(user): RequireExpert,
    Query(mut paging): Query<Paging>,
) -> AppResult<Json<PagedResponse<Vec<Program>>>> {
    let expert = ProgramComposer::resolve_acting_expert(&state.pool, user.account_id).await?;
    let programs = ProgramRepo::list_by_expert(&state.pool, expert.expert_id, &mut paging).await?;
    Ok(Json(PagedResponse { data: programs, paging }))
}

/// GET /api/v1/programs/{id}
///
/// The program with its full owned tree.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProgramWithTree>>> {
    let tree = ProgramComposer::load_tree(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tree }))
}

/// PUT /api/v1/programs/{id}
///
/// Patches scalars and replaces the disease/goal sets atomically.
pub async fn update(
    State(state): State<AppState>,
    RequireExpert(user): RequireExpert,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgramRequest>,
) -> AppResult<Json<DataResponse<Program>>> {
    input.validate()?;
    let program = ProgramComposer::update_program(&state.pool, id, user.account_id, &input).await?;
    Ok(Json(DataResponse { data: program }))
}

/// DELETE /api/v1/programs/{id}
///
/// Deactivates when participants exist, hard-deletes the tree otherwise.
pub async fn delete(
    State(state): State<AppState>,
    RequireExpert(user): RequireExpert,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteResponse>>> {
    let outcome = ProgramComposer::delete_program(&state.pool, user.account_id, id).await?;
    Ok(Json(DataResponse { data: outcome.into() }))
}
