use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A single set within an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub reps: i32,
    pub weight: f64,
}

/// An exercise and its ordered sets, stored as JSON on the workout row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<ExerciseSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioEntry {
    pub name: String,
    pub minutes: i32,
}

/// A workout template assigned to a weekday (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub day_of_week: i16,
    pub exercises: Json<Vec<Exercise>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1, max = 100, message = "Workout name must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 0, max = 6, message = "Weekday must be 0 (Sunday) to 6 (Saturday)"))]
    pub day_of_week: Option<i16>,

    pub exercises: Option<Vec<Exercise>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[validate(length(min = 1, max = 100, message = "Workout name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 6, message = "Weekday must be 0 (Sunday) to 6 (Saturday)"))]
    pub day_of_week: Option<i16>,

    /// Replaces the whole exercise list when present.
    pub exercises: Option<Vec<Exercise>>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutQuery {
    pub day_of_week: Option<i16>,
}

/// The single log row per (owner, date): what was actually performed.
/// `workout_id` goes null when the referenced workout is later deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    pub workout_id: Option<Uuid>,
    pub exercises: Json<Vec<Exercise>>,
    pub cardio: Json<Vec<CardioEntry>>,
    pub body_weight: Option<f64>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertWorkoutLogRequest {
    pub log_date: Option<NaiveDate>,
    pub workout_id: Option<Uuid>,
    pub exercises: Option<Vec<Exercise>>,
    pub cardio: Option<Vec<CardioEntry>>,
    pub body_weight: Option<f64>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutLogQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
