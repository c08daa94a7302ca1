use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One mood rating per (owner, date), on a 1-10 scale.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodRating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rated_on: NaiveDate,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertMoodRequest {
    pub date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: i16,
}

#[derive(Debug, Deserialize)]
pub struct MoodQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
