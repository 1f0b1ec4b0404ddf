use std::sync::Arc;

use vitaplan_core::otp::OtpStore;

use crate::config::ServerConfig;
use crate::notifications::mailer::OtpMailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitaplan_db::DbPool,
    /// Server configuration (JWT secrets, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// TTL-based one-time-password storage.
    pub otp_store: Arc<dyn OtpStore>,
    /// SMTP mailer for OTP delivery; `None` when SMTP is unconfigured
    /// (codes are then only logged, which is fine for development).
    pub mailer: Option<Arc<OtpMailer>>,
}
