//! Level entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitaplan_core::types::{DbId, Timestamp};

use crate::models::activity::ActivityWithRepeatDays;

/// A row from the `levels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Level {
    pub level_id: DbId,
    /// Owning program; immutable once created.
    pub program_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub point_require: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a level under an existing program.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLevelRequest {
    pub program_id: DbId,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub point_require: i32,
}

/// A level enriched with its activities, for program detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct LevelWithActivities {
    #[serde(flatten)]
    pub level: Level,
    pub activities: Vec<ActivityWithRepeatDays>,
}
