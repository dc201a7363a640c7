//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::{AuthRequest, AuthResponse, LoginRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::RefreshTokenHeader;

/// POST /auth/signup - Register a new account.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .mailbox
        .register(&req.username, &req.password, req.nickname.as_deref())
        .await?;

    Ok(StatusCode::CREATED)
}

/// POST /auth/login - Exchange credentials for tokens.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let tokens = state.mailbox.login(&req.username, &req.password).await?;
    Ok(Json(tokens.into()))
}

/// POST /auth/refresh - Mint a new access token.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    RefreshTokenHeader(refresh_token): RefreshTokenHeader,
) -> Result<Json<AuthResponse>, ApiError> {
    let tokens = state.mailbox.refresh(&refresh_token).await?;
    Ok(Json(tokens.into()))
}
