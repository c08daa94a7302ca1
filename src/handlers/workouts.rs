use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use sqlx::types::Json as SqlJson;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::workout::{
    CreateWorkoutRequest, Exercise, UpdateWorkoutRequest, Workout, WorkoutQuery,
};
use crate::AppState;

pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<WorkoutQuery>,
) -> AppResult<Json<Vec<Workout>>> {
    let workouts = if let Some(day) = query.day_of_week {
        sqlx::query_as::<_, Workout>(
            r#"
            SELECT * FROM workouts
            WHERE user_id = $1 AND day_of_week = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(auth_user.id)
        .bind(day)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, Workout>(
            "SELECT * FROM workouts WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(auth_user.id)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(workouts))
}

pub async fn get_workout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(workout_id): Path<Uuid>,
) -> AppResult<Json<Workout>> {
    let workout =
        sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id)
            .bind(auth_user.id)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::NotFound("Workout not found".into()))?;

    Ok(Json(workout))
}

pub async fn create_workout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateWorkoutRequest>,
) -> AppResult<Json<Workout>> {
    body.validate()?;

    let exercises: Vec<Exercise> = body.exercises.unwrap_or_default();

    let workout = sqlx::query_as::<_, Workout>(
        r#"
        INSERT INTO workouts (id, user_id, name, day_of_week, exercises)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&body.name)
    .bind(body.day_of_week.unwrap_or(0))
    .bind(SqlJson(exercises))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(workout))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(workout_id): Path<Uuid>,
    Json(body): Json<UpdateWorkoutRequest>,
) -> AppResult<Json<Workout>> {
    body.validate()?;

    let workout = sqlx::query_as::<_, Workout>(
        r#"
        UPDATE workouts SET
            name = COALESCE($3, name),
            day_of_week = COALESCE($4, day_of_week),
            exercises = COALESCE($5, exercises),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(workout_id)
    .bind(auth_user.id)
    .bind(&body.name)
    .bind(body.day_of_week)
    .bind(body.exercises.map(SqlJson))
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Workout not found".into()))?;

    Ok(Json(workout))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(workout_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    // Logs referencing this workout keep their snapshot; the FK nulls out.
    let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
        .bind(workout_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Workout not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
