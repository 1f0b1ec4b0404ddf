//! Disease catalog and program-disease join rows.

use serde::Serialize;
use sqlx::FromRow;
use vitaplan_core::types::{DbId, RowId};

/// A row from the `diseases` catalog table (seeded by migration).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Disease {
    pub disease_id: RowId,
    pub name: String,
}

/// A row from the `program_diseases` join table. Owned by the program and
/// replaced wholesale on update, never diffed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramDisease {
    pub id: RowId,
    pub program_id: DbId,
    pub disease_id: RowId,
}
