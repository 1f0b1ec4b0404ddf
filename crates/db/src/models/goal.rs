//! Goal catalog and program-goal join rows.

use serde::Serialize;
use sqlx::FromRow;
use vitaplan_core::types::{DbId, RowId};

/// A row from the `goals` catalog table (seeded by migration).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub goal_id: RowId,
    pub name: String,
}

/// A row from the `program_goals` join table. Owned by the program and
/// replaced wholesale on update.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramGoal {
    pub id: RowId,
    pub program_id: DbId,
    pub goal_id: RowId,
}
