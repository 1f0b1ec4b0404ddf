//! Admin handlers: account management (list, create, lock/unlock).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;
use vitaplan_core::error::CoreError;
use vitaplan_core::paging::Paging;
use vitaplan_core::roles::{ROLE_ADMIN, ROLE_EXPERT, ROLE_USER};
use vitaplan_core::types::DbId;
use vitaplan_db::models::account::{Account, CreateAccount};
use vitaplan_db::repositories::{AccountRepo, SessionRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /api/v1/admin/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(mut paging): Query<Paging>,
) -> AppResult<Json<PagedResponse<Vec<Account>>>> {
    let accounts = AccountRepo::list(&state.pool, &mut paging).await?;
    Ok(Json(PagedResponse { data: accounts, paging }))
}

/// POST /api/v1/admin/accounts
///
/// Admin-created accounts start verified (no OTP round trip).
pub async fn create_account(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateAccount>,
) -> AppResult<(StatusCode, Json<DataResponse<Account>>)> {
    input.validate()?;

    let role = input.role.as_deref().unwrap_or(ROLE_USER);
    if ![ROLE_ADMIN, ROLE_EXPERT, ROLE_USER].contains(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {role}"
        ))));
    }

    if AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash =
        hash_password(&input.password).map_err(|e| AppError::InternalError(e.to_string()))?;
    let account = AccountRepo::insert(
        &state.pool,
        Uuid::new_v4(),
        &input.email,
        &password_hash,
        role,
    )
    .await?;
    AccountRepo::mark_verified(&state.pool, account.account_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: account })))
}

/// PATCH /api/v1/admin/accounts/{id}/lock
///
/// Locking also revokes every live refresh session.
pub async fn lock_account(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let changed = AccountRepo::set_status(&state.pool, id, false).await?;
    if !changed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id,
        }));
    }
    SessionRepo::revoke_all_for_account(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/admin/accounts/{id}/unlock
pub async fn unlock_account(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let changed = AccountRepo::set_status(&state.pool, id, true).await?;
    if !changed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
