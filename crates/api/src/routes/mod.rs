//! Route tree for the API.
//!
//! ```text
//! /health                                   liveness probe (root level)
//!
//! /api/v1/auth/register                     register (POST)
//! /api/v1/auth/verify-email                 consume verification OTP (POST)
//! /api/v1/auth/login                        login (POST)
//! /api/v1/auth/token/refresh                rotate refresh token (POST)
//! /api/v1/auth/password/forgot              request reset OTP (POST)
//! /api/v1/auth/password/reset               consume reset OTP (POST)
//! /api/v1/auth/password/change              change password (POST, auth)
//!
//! /api/v1/admin/accounts                    list, create (GET, POST)
//! /api/v1/admin/accounts/{id}/lock          lock (PATCH)
//! /api/v1/admin/accounts/{id}/unlock        unlock (PATCH)
//!
//! /api/v1/experts                           list, create (GET, POST)
//! /api/v1/experts/{id}                      get, update, delete
//!
//! /api/v1/profile                           create, get, update
//!
//! /api/v1/programs                          create program tree (POST)
//! /api/v1/programs/mine                     expert's programs (GET)
//! /api/v1/programs/{id}                     tree, update, delete
//! /api/v1/levels                            create level (POST)
//! /api/v1/levels/{id}/activities            list activities (GET)
//! /api/v1/activities                        create activity (POST)
//! /api/v1/activities/{id}                   get, update, delete
//!
//! /api/v1/catalog/diseases                  list (GET)
//! /api/v1/catalog/goals                     list (GET)
//!
//! /api/v1/schedules                         create (POST)
//! /api/v1/schedules/program/{program_id}    list (GET)
//!
//! /api/v1/user/programs/enroll              enroll (POST)
//! /api/v1/user/activities/{id}/status       record status (POST)
//! ```

pub mod activity;
pub mod admin;
pub mod auth;
pub mod catalog;
pub mod expert;
pub mod health;
pub mod profile;
pub mod program;
pub mod schedule;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/experts", expert::router())
        .nest("/profile", profile::router())
        .nest("/programs", program::router())
        .nest("/levels", program::level_router())
        .nest("/activities", activity::router())
        .nest("/catalog", catalog::router())
        .nest("/schedules", schedule::router())
        .nest("/user", user::router())
}
