//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the requirement, enforcing authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitaplan_core::error::CoreError;
use vitaplan_core::roles::{ROLE_ADMIN, ROLE_EXPERT};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `expert` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// Note this only gates by role; per-program ownership is enforced by the
/// composer against the expert profile.
pub struct RequireExpert(pub AuthUser);

impl FromRequestParts<AppState> for RequireExpert {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_EXPERT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Expert role required".into(),
            )));
        }
        Ok(RequireExpert(user))
    }
}
