//! Signed access and refresh tokens.
//!
//! Tokens are HS256 JWTs whose subject is the username. Both kinds share one
//! secret; the `typ` claim keeps a refresh token from being used as an access
//! token and vice versa.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::{MailboxError, Result};

const SECS_PER_DAY: u64 = 86_400;

/// Token kind, carried in the `typ` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token for API calls.
    Access,
    /// Long-lived token used only to mint access tokens.
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username).
    pub sub: String,
    /// Token kind.
    pub typ: TokenKind,
    /// Issued at (unix seconds).
    pub iat: u64,
    /// Expiration (unix seconds).
    pub exp: u64,
    /// Unique token ID.
    pub jti: String,
}

/// Issues and validates tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenService {
    /// Create a token service from a secret and lifetimes.
    pub fn new(secret: &str, access_ttl_secs: u64, refresh_ttl_days: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl_secs,
            refresh_ttl_secs: refresh_ttl_days.saturating_mul(SECS_PER_DAY),
        }
    }

    /// Create a token service from the `[auth]` config section.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.access_token_expiry_secs,
            config.refresh_token_expiry_days,
        )
    }

    /// Issue a short-lived access token for `username`.
    pub fn create_access_token(&self, username: &str) -> Result<String> {
        self.issue(username, TokenKind::Access, self.access_ttl_secs)
    }

    /// Issue a long-lived refresh token for `username`.
    pub fn create_refresh_token(&self, username: &str) -> Result<String> {
        self.issue(username, TokenKind::Refresh, self.refresh_ttl_secs)
    }

    fn issue(&self, username: &str, typ: TokenKind, ttl_secs: u64) -> Result<String> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = TokenClaims {
            sub: username.to_string(),
            typ,
            iat: now,
            exp: now.saturating_add(ttl_secs),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            MailboxError::Config(format!("token signing failed: {e}"))
        })
    }

    /// True iff the signature is valid and the token has not expired.
    pub fn validate_token(&self, token: &str) -> bool {
        self.claims(token).is_ok()
    }

    /// Extract the username from a token.
    ///
    /// The token is fully validated; a bad token yields [`MailboxError::InvalidToken`].
    pub fn get_username(&self, token: &str) -> Result<String> {
        Ok(self.claims(token)?.sub)
    }

    /// Validate a token and require it to be of `kind`.
    pub fn decode(&self, token: &str, kind: TokenKind) -> Result<TokenClaims> {
        let claims = self.claims(token)?;
        if claims.typ != kind {
            tracing::debug!(expected = ?kind, actual = ?claims.typ, "Token kind mismatch");
            return Err(MailboxError::InvalidToken);
        }
        Ok(claims)
    }

    fn claims(&self, token: &str) -> Result<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                MailboxError::InvalidToken
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish_non_exhaustive()
    }
}
