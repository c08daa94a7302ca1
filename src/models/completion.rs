use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per (owner, habit, date); the unique key makes every write an
/// upsert rather than an append.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HabitCompletion {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub completed_on: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleCompletionRequest {
    pub habit_id: Uuid,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertCompletionRequest {
    pub habit_id: Uuid,
    pub date: Option<NaiveDate>,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompletionQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub habit_id: Option<Uuid>,
}
