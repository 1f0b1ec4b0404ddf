//! Well-known account role names.
//!
//! These match the values stored in the `accounts.role` column.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EXPERT: &str = "expert";
pub const ROLE_USER: &str = "user";
