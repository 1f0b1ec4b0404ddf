//! Handlers for the `/experts` resource. Mutations are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;
use vitaplan_core::error::CoreError;
use vitaplan_core::paging::Paging;
use vitaplan_core::phone::is_valid_vietnamese_phone_number;
use vitaplan_core::types::DbId;
use vitaplan_db::models::expert::{CreateExpert, Expert, UpdateExpert};
use vitaplan_db::repositories::ExpertRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// POST /api/v1/experts
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateExpert>,
) -> AppResult<(StatusCode, Json<DataResponse<Expert>>)> {
    input.validate()?;
    if let Some(phone) = input.telephone_number.as_deref() {
        if !phone.is_empty() && !is_valid_vietnamese_phone_number(phone) {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid telephone number".into(),
            )));
        }
    }

    let expert = ExpertRepo::insert(&state.pool, Uuid::new_v4(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: expert })))
}

/// GET /api/v1/experts
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(mut paging): Query<Paging>,
) -> AppResult<Json<PagedResponse<Vec<Expert>>>> {
    let experts = ExpertRepo::list(&state.pool, &mut paging).await?;
    Ok(Json(PagedResponse { data: experts, paging }))
}

/// GET /api/v1/experts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Expert>>> {
    let expert = ExpertRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expert",
            id,
        }))?;
    Ok(Json(DataResponse { data: expert }))
}

/// PUT /api/v1/experts/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExpert>,
) -> AppResult<Json<DataResponse<Expert>>> {
    input.validate()?;
    if let Some(phone) = input.telephone_number.as_deref() {
        if !phone.is_empty() && !is_valid_vietnamese_phone_number(phone) {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid telephone number".into(),
            )));
        }
    }

    let expert = ExpertRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expert",
            id,
        }))?;
    Ok(Json(DataResponse { data: expert }))
}

/// DELETE /api/v1/experts/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ExpertRepo::mark_deleted(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Expert",
            id,
        }))
    }
}
