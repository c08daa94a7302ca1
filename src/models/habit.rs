use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A tracked habit. `scheduled_days` always holds seven flags,
/// indexed 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub scheduled_days: Vec<bool>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "Habit name must be 1-100 characters"))]
    pub name: String,

    /// Defaults to every day of the week.
    #[validate(length(equal = 7, message = "Schedule must have exactly 7 entries"))]
    pub scheduled_days: Option<Vec<bool>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "Habit name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(equal = 7, message = "Schedule must have exactly 7 entries"))]
    pub scheduled_days: Option<Vec<bool>>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicableQuery {
    pub date: Option<NaiveDate>,
}
