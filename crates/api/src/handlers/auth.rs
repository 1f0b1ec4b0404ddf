//! Handlers for the `/auth` resource: registration, email verification,
//! login, token refresh, and password management.
//!
//! Token issuance is plumbing around the core: handlers resolve accounts,
//! delegate hashing to [`crate::auth::password`] and signing to
//! [`crate::auth::jwt`], and hand one-time codes to the OTP store/mailer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use vitaplan_core::error::CoreError;
use vitaplan_core::otp::{generate_code, OtpPurpose, DEFAULT_OTP_TTL};
use vitaplan_core::roles::ROLE_USER;
use vitaplan_db::models::account::Account;
use vitaplan_db::repositories::{AccountRepo, SessionRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    #[validate(length(min = 8, max = 100))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 8, max = 100))]
    pub new_password: String,
}

/// Access + refresh token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Creates an unverified `user` account and emails a verification code.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Account>>)> {
    input.validate()?;

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
        ROLE_USER,
    )
    .await?;

    issue_otp(&state, &account.email, OtpPurpose::VerifyEmail).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: account })))
}

/// POST /api/v1/auth/verify-email
///
/// Consumes a verification code and flags the account verified.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<StatusCode> {
    let valid = state
        .otp_store
        .verify(&input.email, OtpPurpose::VerifyEmail, &input.code)
        .await;
    if !valid {
        return Err(AppError::BadRequest("Invalid or expired code".into()));
    }

    let account = AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired code".into()))?;
    AccountRepo::mark_verified(&state.pool, account.account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/login
///
/// Only verified, unlocked accounts may log in. The access and refresh
/// tokens are produced concurrently and joined before returning.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<TokenPair>>> {
    let account = AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_ok = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    if !password_ok {
        return Err(invalid_credentials());
    }
    if !account.account_status {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is locked".into(),
        )));
    }
    if !account.is_verified {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Email is not verified".into(),
        )));
    }

    let pair = issue_token_pair(&state, &account).await?;
    Ok(Json(DataResponse { data: pair }))
}

/// POST /api/v1/auth/token/refresh
///
/// Rotates the refresh token: the presented one is revoked and a fresh
/// pair is issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<TokenPair>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let account = AccountRepo::find_by_id(&state.pool, session.account_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))?;
    if !account.account_status {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is locked".into(),
        )));
    }

    SessionRepo::revoke(&state.pool, session.id).await?;
    let pair = issue_token_pair(&state, &account).await?;
    Ok(Json(DataResponse { data: pair }))
}

/// POST /api/v1/auth/password/forgot
///
/// Always answers 204 so the endpoint cannot be used to probe for
/// registered addresses; a code is only sent when the account exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<StatusCode> {
    if AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        issue_otp(&state, &input.email, OtpPurpose::ResetPassword).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password/reset
///
/// Consumes a reset code, replaces the password, and revokes every live
/// session of the account.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let valid = state
        .otp_store
        .verify(&input.email, OtpPurpose::ResetPassword, &input.code)
        .await;
    if !valid {
        return Err(AppError::BadRequest("Invalid or expired code".into()));
    }

    let account = AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired code".into()))?;

    let password_hash =
        hash_password(&input.new_password).map_err(|e| AppError::InternalError(e.to_string()))?;
    AccountRepo::update_password(&state.pool, account.account_id, &password_hash).await?;
    SessionRepo::revoke_all_for_account(&state.pool, account.account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password/change
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let account = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: user.account_id,
        }))?;

    let password_ok = verify_password(&input.old_password, &account.password_hash)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    if !password_ok {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let password_hash =
        hash_password(&input.new_password).map_err(|e| AppError::InternalError(e.to_string()))?;
    AccountRepo::update_password(&state.pool, account.account_id, &password_hash).await?;
    SessionRepo::revoke_all_for_account(&state.pool, account.account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Sign an access token and mint a refresh session, concurrently.
async fn issue_token_pair(state: &AppState, account: &Account) -> AppResult<TokenPair> {
    let (access, refresh) = tokio::join!(
        async { generate_access_token(account.account_id, &account.role, &state.config.jwt) },
        async { generate_refresh_token() },
    );
    let access_token = access.map_err(|e| AppError::InternalError(e.to_string()))?;
    let (refresh_token, refresh_hash) = refresh;

    let expires_at = Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::insert(&state.pool, account.account_id, &refresh_hash, expires_at).await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        token_type: "Bearer",
    })
}

/// Store a fresh code and hand it to the mailer. Delivery failures are
/// logged, not surfaced; the client can always request another code.
async fn issue_otp(state: &AppState, email: &str, purpose: OtpPurpose) {
    let code = generate_code();
    state.otp_store.put(email, purpose, &code, DEFAULT_OTP_TTL).await;

    match &state.mailer {
        Some(mailer) => {
            if let Err(err) = mailer.send_otp(email, purpose, &code).await {
                tracing::warn!(error = %err, purpose = purpose.as_str(), "OTP email delivery failed");
            }
        }
        None => {
            tracing::info!(purpose = purpose.as_str(), "SMTP not configured; OTP code not emailed");
        }
    }
}
