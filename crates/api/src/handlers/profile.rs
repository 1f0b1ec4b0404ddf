//! Handlers for the `/profile` resource (the acting user's own profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vitaplan_core::error::CoreError;
use vitaplan_db::models::profile::{CreateProfile, ProfileResponse, UpdateProfile};
use vitaplan_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/profile
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    input.validate()?;

    if ProfileRepo::find_by_account(&state.pool, user.account_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Profile already exists".into(),
        )));
    }

    let profile = ProfileRepo::insert(&state.pool, user.account_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: profile.into() }),
    ))
}

/// GET /api/v1/profile
///
/// The response carries the derived BMI.
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::find_by_account(&state.pool, user.account_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.account_id,
        }))?;
    Ok(Json(DataResponse { data: profile.into() }))
}

/// PUT /api/v1/profile
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    input.validate()?;
    let profile = ProfileRepo::update(&state.pool, user.account_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.account_id,
        }))?;
    Ok(Json(DataResponse { data: profile.into() }))
}
