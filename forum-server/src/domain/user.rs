use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

const USERNAME_MIN_CHARS: usize = 3;
const USERNAME_MAX_CHARS: usize = 64;
const PASSWORD_MIN_CHARS: usize = 8;
const PASSWORD_MAX_CHARS: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        let password_len = self.password.chars().count();
        if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&password_len) {
            return Err(DomainError::validation("password", "must be 8..128 chars"));
        }
        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.chars().count() > USERNAME_MAX_CHARS {
            return Err(DomainError::validation("username", "must be 1..64 chars"));
        }
        if self.password.is_empty() {
            return Err(DomainError::validation("password", "must not be empty"));
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

/// Registered account as seen by the account owner. Carries no credential
/// material; the password hash only travels inside `UserCredentials`.
#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::validation("id", "must be > 0"));
        }
        let username = normalize_username(&username.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            username,
            email,
            created_at,
        })
    }
}

/// Public projection of a user embedded in thread and reply listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Author {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) created_at: DateTime<Utc>,
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len) {
        return Err(DomainError::validation("username", "must be 3..64 chars"));
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::validation("email", "must be a valid email"));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{LoginRequest, RegisterRequest, User, normalize_email, normalize_username};
    use crate::domain::error::DomainError;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "forum_user", "user@example.com", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let value = normalize_email("  Reader@Forum.EXAMPLE ").expect("must be valid");
        assert_eq!(value, "reader@forum.example");
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn username_length_is_counted_in_chars() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username("абв").is_ok());
        assert!(normalize_username(&"u".repeat(65)).is_err());
    }

    #[test]
    fn register_checks_password_bounds() {
        let short = RegisterRequest {
            username: "forum_user".to_string(),
            email: "user@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(matches!(
            short.validate(),
            Err(DomainError::Validation {
                field: "password",
                ..
            })
        ));

        let ok = RegisterRequest {
            username: "  forum_user ".to_string(),
            email: "USER@example.com".to_string(),
            password: "long-enough-password".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.username, "forum_user");
        assert_eq!(validated.email, "user@example.com");
    }

    #[test]
    fn login_rejects_empty_password() {
        let req = LoginRequest {
            username: "forum_user".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
