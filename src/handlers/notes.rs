use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::note::{Note, NoteQuery, UpsertNoteRequest};
use crate::AppState;

/// Upsert the note for (owner, date); the latest content wins.
pub async fn upsert_note(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertNoteRequest>,
) -> AppResult<Json<Note>> {
    body.validate()?;

    let content = body.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Note content is required".into()));
    }

    let note_date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let note = sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (id, user_id, note_date, content)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, note_date) DO UPDATE SET
            content = EXCLUDED.content,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(note_date)
    .bind(content)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(note))
}

pub async fn list_notes(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<NoteQuery>,
) -> AppResult<Json<Vec<Note>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let notes = sqlx::query_as::<_, Note>(
        r#"
        SELECT * FROM notes
        WHERE user_id = $1 AND note_date BETWEEN $2 AND $3
        ORDER BY note_date DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(notes))
}
