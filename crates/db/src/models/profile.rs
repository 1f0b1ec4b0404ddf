//! User profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitaplan_core::bmi::calculate_bmi;
use vitaplan_core::types::{DbId, Timestamp};

/// A row from the `profiles` table (one per account).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub account_id: DbId,
    pub full_name: String,
    pub year_of_birth: i32,
    pub gender: bool,
    /// Kilograms.
    pub weight: i32,
    /// Centimetres.
    pub height: i32,
    pub avatar_url: Option<String>,
    pub health_goal: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfile {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year_of_birth: i32,
    pub gender: Option<bool>,
    #[validate(range(min = 1))]
    pub weight: i32,
    #[validate(range(min = 1))]
    pub height: i32,
    pub avatar_url: Option<String>,
    pub health_goal: Option<String>,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year_of_birth: Option<i32>,
    pub gender: Option<bool>,
    #[validate(range(min = 1))]
    pub weight: Option<i32>,
    #[validate(range(min = 1))]
    pub height: Option<i32>,
    pub avatar_url: Option<String>,
    pub health_goal: Option<String>,
}

/// Profile response enriched with the derived BMI.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub bmi: f64,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let bmi = calculate_bmi(profile.weight, profile.height);
        Self { profile, bmi }
    }
}
