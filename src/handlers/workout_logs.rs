use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::workout::{
    UpsertWorkoutLogRequest, Workout, WorkoutLog, WorkoutLogQuery,
};
use crate::AppState;

/// Upsert the single log row for (owner, date). A conflicting row is
/// replaced wholesale: exercises, cardio, body weight and note all take
/// the new values, so logging a date twice never merges old content.
pub async fn upsert_workout_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertWorkoutLogRequest>,
) -> AppResult<Json<WorkoutLog>> {
    let log_date = body.log_date.unwrap_or_else(|| Utc::now().date_naive());

    // A referenced workout must belong to the caller
    if let Some(workout_id) = body.workout_id {
        sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id)
            .bind(auth_user.id)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::NotFound("Workout not found".into()))?;
    }

    let log = sqlx::query_as::<_, WorkoutLog>(
        r#"
        INSERT INTO workout_logs (id, user_id, log_date, workout_id, exercises, cardio, body_weight, note)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id, log_date) DO UPDATE SET
            workout_id = EXCLUDED.workout_id,
            exercises = EXCLUDED.exercises,
            cardio = EXCLUDED.cardio,
            body_weight = EXCLUDED.body_weight,
            note = EXCLUDED.note,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(log_date)
    .bind(body.workout_id)
    .bind(SqlJson(body.exercises.unwrap_or_default()))
    .bind(SqlJson(body.cardio.unwrap_or_default()))
    .bind(body.body_weight)
    .bind(&body.note)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(log))
}

pub async fn list_workout_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<WorkoutLogQuery>,
) -> AppResult<Json<Vec<WorkoutLog>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let logs = sqlx::query_as::<_, WorkoutLog>(
        r#"
        SELECT * FROM workout_logs
        WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
        ORDER BY log_date DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(logs))
}
