//! Expert entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitaplan_core::types::{DbId, Timestamp};

/// A row from the `experts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expert {
    pub expert_id: DbId,
    /// Login account this expert profile belongs to.
    pub account_id: Option<DbId>,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: bool,
    pub telephone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub expert_type: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an expert (admin only).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpert {
    pub account_id: Option<DbId>,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<bool>,
    pub telephone_number: Option<String>,
    pub avatar_url: Option<String>,
    #[validate(length(min = 1))]
    pub expert_type: String,
}

/// DTO for updating an expert. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateExpert {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<bool>,
    pub telephone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub expert_type: Option<String>,
}
