//! Letter handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::mailbox::LetterEntry;
use crate::web::dto::{LetterDto, LetterRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /api/letters - Write today's letter.
pub async fn write_letter(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<LetterRequest>,
) -> Result<(StatusCode, Json<LetterDto>), ApiError> {
    let letter = state
        .mailbox
        .write_letter(&user.username, &req.content)
        .await?;

    let entry = LetterEntry {
        past: letter.is_past(state.mailbox.today()),
        letter,
    };
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// GET /api/letters - List letters up to today, newest first.
pub async fn list_letters(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<LetterDto>>, ApiError> {
    let entries = state.mailbox.get_letters(&user.username).await?;
    Ok(Json(entries.into_iter().map(LetterDto::from).collect()))
}

/// GET /api/letters/today - Whether today's letter exists.
pub async fn written_today(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<bool>, ApiError> {
    let written = state.mailbox.has_written_today(&user.username).await?;
    Ok(Json(written))
}

/// DELETE /api/letters/:id - Delete one of the caller's letters.
pub async fn delete_letter(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    state.mailbox.delete_letter(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
