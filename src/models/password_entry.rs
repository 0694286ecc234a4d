//! Password entry domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored credential record, owned by exactly one user
///
/// The secret is stored as submitted; there is no server-side
/// encryption-at-rest layer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PasswordEntry {
    pub id: i32,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: Option<String>,
    pub user_id: i32,
    pub notes: Option<String>,

    /// Set when the client consumes the secret (e.g. copy to clipboard)
    pub last_used: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update request for a password entry
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordEntryRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, username: &str, password: &str) -> PasswordEntryRequest {
        PasswordEntryRequest {
            title: title.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            url: None,
            notes: None,
        }
    }

    #[test]
    fn test_entry_request_valid() {
        assert!(request("Bank", "alice", "p@ss").validate().is_ok());
    }

    #[test]
    fn test_entry_request_missing_fields() {
        assert!(request("", "alice", "p@ss").validate().is_err());
        assert!(request("Bank", "", "p@ss").validate().is_err());
        assert!(request("Bank", "alice", "").validate().is_err());
    }

    #[test]
    fn test_entry_request_title_too_long() {
        assert!(request(&"t".repeat(101), "alice", "p@ss").validate().is_err());
        assert!(request(&"t".repeat(100), "alice", "p@ss").validate().is_ok());
    }
}
