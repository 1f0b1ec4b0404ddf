//! Program entity model and composition DTOs.
//!
//! A program is the root of a strict ownership tree:
//! program -> levels -> activities -> repeat days, plus owned disease/goal
//! join rows. The create request carries the whole tree; the composer
//! inserts it in one transaction.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitaplan_core::types::{DbId, RowId, Timestamp};

/// A row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub program_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Program length in days.
    pub duration: i32,
    pub is_active: bool,
    /// Owning expert; immutable once created.
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a program together with its full tree.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProgramRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration: i32,
    #[serde(default)]
    pub disease_ids: Vec<RowId>,
    #[serde(default)]
    pub goal_ids: Vec<RowId>,
    #[serde(default)]
    #[validate(nested)]
    pub levels: Vec<CreateLevelSpec>,
}

/// A level nested inside a program-creation request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLevelSpec {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub point_require: i32,
    #[serde(default)]
    #[validate(nested)]
    pub activities: Vec<CreateActivitySpec>,
}

/// An activity nested inside a program-creation request.
///
/// `activity_type` and `repeat_days` arrive as raw strings; the composer
/// parses them against the closed enums inside the transaction.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivitySpec {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 1))]
    pub point_reward: i32,
    pub activity_type: String,
    #[serde(default)]
    pub repeat_days: Vec<String>,
}

/// DTO for updating a program. Scalar fields are patched; the disease and
/// goal sets are replaced wholesale (an empty list means an empty set).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProgramRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[serde(default)]
    pub disease_ids: Vec<RowId>,
    #[serde(default)]
    pub goal_ids: Vec<RowId>,
}

/// A program enriched with its owned tree, returned by detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramWithTree {
    #[serde(flatten)]
    pub program: Program,
    pub disease_ids: Vec<RowId>,
    pub goal_ids: Vec<RowId>,
    pub levels: Vec<crate::models::level::LevelWithActivities>,
}
