//! One-time-password generation, storage, and verification.
//!
//! Codes are short-lived, single-use, and scoped to an (email, purpose)
//! pair so a password-reset code cannot be replayed to verify an email
//! address. Storage sits behind [`OtpStore`]; callers never see how codes
//! are kept, only issue/verify semantics.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::Mutex;

/// Default code lifetime.
pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(5 * 60);

/// Number of digits in a generated code.
const CODE_LEN: u32 = 6;

/// What an OTP code authorizes. Codes issued for one purpose never verify
/// for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpPurpose {
    VerifyEmail,
    ResetPassword,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::VerifyEmail => "verify_email",
            OtpPurpose::ResetPassword => "reset_password",
        }
    }
}

/// Generate a zero-padded numeric code, e.g. `"042917"`.
pub fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..10u32.pow(CODE_LEN));
    format!("{n:0width$}", width = CODE_LEN as usize)
}

/// TTL-based OTP storage.
///
/// `verify` consumes the code on success; a second call with the same code
/// fails.
#[async_trait::async_trait]
pub trait OtpStore: Send + Sync {
    /// Store a code for the given address and purpose, replacing any code
    /// previously issued for the same pair.
    async fn put(&self, email: &str, purpose: OtpPurpose, code: &str, ttl: Duration);

    /// Check a submitted code. Returns `true` (and consumes the entry)
    /// only if a live, matching code exists.
    async fn verify(&self, email: &str, purpose: OtpPurpose, code: &str) -> bool;
}

/// In-process [`OtpStore`] backed by a mutex-guarded map.
///
/// Expired entries are dropped lazily on access.
#[derive(Default)]
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<(String, OtpPurpose), (String, Instant)>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, email: &str, purpose: OtpPurpose, code: &str, ttl: Duration) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            (email.to_string(), purpose),
            (code.to_string(), Instant::now() + ttl),
        );
    }

    async fn verify(&self, email: &str, purpose: OtpPurpose, code: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let key = (email.to_string(), purpose);
        match entries.get(&key) {
            Some((stored, expires_at)) if *expires_at > Instant::now() && stored == code => {
                entries.remove(&key);
                true
            }
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(&key);
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn verify_consumes_the_code() {
        let store = InMemoryOtpStore::new();
        store
            .put("a@example.com", OtpPurpose::VerifyEmail, "123456", DEFAULT_OTP_TTL)
            .await;

        assert!(store.verify("a@example.com", OtpPurpose::VerifyEmail, "123456").await);
        // Single use: the same code no longer verifies.
        assert!(!store.verify("a@example.com", OtpPurpose::VerifyEmail, "123456").await);
    }

    #[tokio::test]
    async fn wrong_code_purpose_or_address_fails() {
        let store = InMemoryOtpStore::new();
        store
            .put("a@example.com", OtpPurpose::ResetPassword, "123456", DEFAULT_OTP_TTL)
            .await;

        assert!(!store.verify("a@example.com", OtpPurpose::ResetPassword, "654321").await);
        assert!(!store.verify("a@example.com", OtpPurpose::VerifyEmail, "123456").await);
        assert!(!store.verify("b@example.com", OtpPurpose::ResetPassword, "123456").await);
        // The stored code survives failed attempts.
        assert!(store.verify("a@example.com", OtpPurpose::ResetPassword, "123456").await);
    }

    #[tokio::test]
    async fn expired_codes_never_verify() {
        let store = InMemoryOtpStore::new();
        store
            .put("a@example.com", OtpPurpose::VerifyEmail, "123456", Duration::ZERO)
            .await;

        assert!(!store.verify("a@example.com", OtpPurpose::VerifyEmail, "123456").await);
    }

    #[tokio::test]
    async fn reissue_replaces_previous_code() {
        let store = InMemoryOtpStore::new();
        store
            .put("a@example.com", OtpPurpose::VerifyEmail, "111111", DEFAULT_OTP_TTL)
            .await;
        store
            .put("a@example.com", OtpPurpose::VerifyEmail, "222222", DEFAULT_OTP_TTL)
            .await;

        assert!(!store.verify("a@example.com", OtpPurpose::VerifyEmail, "111111").await);
        assert!(store.verify("a@example.com", OtpPurpose::VerifyEmail, "222222").await);
    }
}
