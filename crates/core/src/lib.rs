//! Vitaplan domain core.
//!
//! Pure domain logic shared by the persistence and HTTP layers: common
//! types, the error taxonomy, closed-enum codecs, OTP code handling, and
//! small health-domain helpers (BMI, phone validation, paging).

pub mod bmi;
pub mod enums;
pub mod error;
pub mod otp;
pub mod paging;
pub mod phone;
pub mod roles;
pub mod types;
