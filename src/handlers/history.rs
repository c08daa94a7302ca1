use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::completion::HabitCompletion;
use crate::models::habit::Habit;
use crate::models::mood::MoodRating;
use crate::models::note::Note;
use crate::models::workout::{Workout, WorkoutLog};
use crate::services::history::{build_history, month_days, DayHistory};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub year: i32,
    pub month: u32,
}

/// The month view: one range query per tracking table, merged in memory
/// into a per-day summary.
pub async fn get_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<DayHistory>>> {
    let days = month_days(query.year, query.month)
        .ok_or_else(|| AppError::Validation("Invalid year/month".into()))?;
    let start = days[0];
    let end = days[days.len() - 1];

    let habits = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE user_id = $1")
        .bind(auth_user.id)
        .fetch_all(&state.db)
        .await?;

    let completions = sqlx::query_as::<_, HabitCompletion>(
        r#"
        SELECT * FROM habit_completions
        WHERE user_id = $1 AND completed_on BETWEEN $2 AND $3
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    let logs = sqlx::query_as::<_, WorkoutLog>(
        r#"
        SELECT * FROM workout_logs
        WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    let workouts = sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE user_id = $1")
        .bind(auth_user.id)
        .fetch_all(&state.db)
        .await?;

    let moods = sqlx::query_as::<_, MoodRating>(
        r#"
        SELECT * FROM mood_ratings
        WHERE user_id = $1 AND rated_on BETWEEN $2 AND $3
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    let notes = sqlx::query_as::<_, Note>(
        r#"
        SELECT * FROM notes
        WHERE user_id = $1 AND note_date BETWEEN $2 AND $3
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    let history = build_history(
        &days,
        &habits,
        &completions,
        &logs,
        &workouts,
        &moods,
        &notes,
    );

    Ok(Json(history))
}
