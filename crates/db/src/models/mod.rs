//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod account;
pub mod activity;
pub mod disease;
pub mod expert;
pub mod goal;
pub mod level;
pub mod participation;
pub mod profile;
pub mod program;
pub mod schedule;
pub mod session;
