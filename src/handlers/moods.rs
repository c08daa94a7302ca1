use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::mood::{MoodQuery, MoodRating, UpsertMoodRequest};
use crate::AppState;

/// Upsert the mood rating for (owner, date); the latest value wins.
pub async fn upsert_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertMoodRequest>,
) -> AppResult<Json<MoodRating>> {
    body.validate()?;

    let rated_on = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let mood = sqlx::query_as::<_, MoodRating>(
        r#"
        INSERT INTO mood_ratings (id, user_id, rated_on, rating)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, rated_on) DO UPDATE SET
            rating = EXCLUDED.rating,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(rated_on)
    .bind(body.rating)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(mood))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodQuery>,
) -> AppResult<Json<Vec<MoodRating>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let moods = sqlx::query_as::<_, MoodRating>(
        r#"
        SELECT * FROM mood_ratings
        WHERE user_id = $1 AND rated_on BETWEEN $2 AND $3
        ORDER BY rated_on DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(moods))
}
