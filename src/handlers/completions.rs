use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::completion::{
    CompletionQuery, HabitCompletion, ToggleCompletionRequest, UpsertCompletionRequest,
};
use crate::models::habit::Habit;
use crate::AppState;

async fn verify_habit_ownership(
    db: &sqlx::PgPool,
    habit_id: Uuid,
    user_id: Uuid,
) -> AppResult<Habit> {
    sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1 AND user_id = $2")
        .bind(habit_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))
}

/// Toggle a habit's completion for a date: inserts `completed = true`, or
/// flips the stored flag when the row already exists. One atomic upsert,
/// so repeated toggles never create duplicate rows.
pub async fn toggle_completion(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<ToggleCompletionRequest>,
) -> AppResult<Json<HabitCompletion>> {
    verify_habit_ownership(&state.db, body.habit_id, auth_user.id).await?;

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let completion = sqlx::query_as::<_, HabitCompletion>(
        r#"
        INSERT INTO habit_completions (id, habit_id, user_id, completed_on, completed)
        VALUES ($1, $2, $3, $4, true)
        ON CONFLICT (user_id, habit_id, completed_on)
            DO UPDATE SET completed = NOT habit_completions.completed
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.habit_id)
    .bind(auth_user.id)
    .bind(date)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(completion))
}

/// Explicit upsert: last write wins on the (owner, habit, date) key.
pub async fn upsert_completion(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertCompletionRequest>,
) -> AppResult<Json<HabitCompletion>> {
    verify_habit_ownership(&state.db, body.habit_id, auth_user.id).await?;

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let completion = sqlx::query_as::<_, HabitCompletion>(
        r#"
        INSERT INTO habit_completions (id, habit_id, user_id, completed_on, completed)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, habit_id, completed_on)
            DO UPDATE SET completed = EXCLUDED.completed
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.habit_id)
    .bind(auth_user.id)
    .bind(date)
    .bind(body.completed)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(completion))
}

pub async fn list_completions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<CompletionQuery>,
) -> AppResult<Json<Vec<HabitCompletion>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let completions = if let Some(habit_id) = query.habit_id {
        sqlx::query_as::<_, HabitCompletion>(
            r#"
            SELECT * FROM habit_completions
            WHERE user_id = $1 AND habit_id = $2 AND completed_on BETWEEN $3 AND $4
            ORDER BY completed_on DESC
            "#,
        )
        .bind(auth_user.id)
        .bind(habit_id)
        .bind(start)
        .bind(end)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, HabitCompletion>(
            r#"
            SELECT * FROM habit_completions
            WHERE user_id = $1 AND completed_on BETWEEN $2 AND $3
            ORDER BY completed_on DESC
            "#,
        )
        .bind(auth_user.id)
        .bind(start)
        .bind(end)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(completions))
}
