//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthRequest {
    /// Username.
    #[validate(
        length(min = 1, max = 32, message = "Username must be 1-32 characters"),
        custom(function = "no_control_chars")
    )]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
    /// Display name (optional).
    #[serde(default)]
    #[validate(length(max = 32, message = "Nickname must be at most 32 characters"))]
    pub nickname: Option<String>,
}

/// Login request.
///
/// No length rules: an unknown or over-long username is reported by the
/// lookup, and a wrong password by verification.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Letter write request.
#[derive(Debug, Deserialize, Validate)]
pub struct LetterRequest {
    /// Letter body.
    #[validate(
        length(min = 1, max = 2000, message = "Letter must be 1-2000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(username: &str, password: &str, nickname: Option<&str>) -> AuthRequest {
        AuthRequest {
            username: username.to_string(),
            password: password.to_string(),
            nickname: nickname.map(str::to_string),
        }
    }

    #[test]
    fn test_auth_request_valid() {
        assert!(auth("alice", "pw", Some("Al")).validate().is_ok());
        assert!(auth("alice", "pw", None).validate().is_ok());
    }

    #[test]
    fn test_auth_request_invalid() {
        let errors = auth("", "pw", None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let errors = auth("alice", "", None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let long = "n".repeat(33);
        let errors = auth("alice", "pw", Some(&long)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nickname"));

        assert!(auth("al\x07ice", "pw", None).validate().is_err());
    }

    #[test]
    fn test_nickname_is_optional_in_json() {
        let req: AuthRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw"}"#).unwrap();
        assert!(req.nickname.is_none());
    }

    #[test]
    fn test_login_request_has_no_length_rules() {
        let req = LoginRequest {
            username: "a".repeat(40),
            password: String::new(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_letter_request() {
        let ok = LetterRequest {
            content: "hello".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank = LetterRequest {
            content: "   ".to_string(),
        };
        assert!(blank.validate().is_err());

        let long = LetterRequest {
            content: "x".repeat(2001),
        };
        assert!(long.validate().is_err());
    }
}
