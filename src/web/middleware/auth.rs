//! Token authentication middleware and extractors.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use crate::auth::{TokenKind, TokenService};
use crate::web::error::ApiError;

/// Header carrying the refresh token on `POST /auth/refresh`.
pub const REFRESH_TOKEN_HEADER: HeaderName = HeaderName::from_static("refreshtoken");

/// Extractor for authenticated users.
///
/// Requires `Authorization: Bearer <access token>`. The username comes only
/// from the validated token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The token's subject.
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Missing authorization"))?;

        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .ok_or_else(|| ApiError::internal("Token service not configured"))?;

        let claims = tokens.decode(bearer.token(), TokenKind::Access)?;

        Ok(AuthUser {
            username: claims.sub,
        })
    }
}

/// Raw value of the `RefreshToken` header.
///
/// Only presence is checked here; the service validates the token.
#[derive(Debug, Clone)]
pub struct RefreshTokenHeader(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RefreshTokenHeader
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(REFRESH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(|value| RefreshTokenHeader(value.to_string()))
            .ok_or_else(|| ApiError::unauthorized("Missing refresh token"))
    }
}

/// Middleware function to inject the token service into request extensions.
pub async fn jwt_auth(
    tokens: Arc<TokenService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(tokens);
    next.run(request).await
}
