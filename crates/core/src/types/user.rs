//! User session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::role::UserRole;

/// The logged-in user, as adopted by the engine.
///
/// Produced by an external login flow and trusted as-is; the engine only
/// reads the role. Persisted verbatim as the session blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Role controlling access to administrative screens.
    pub role: UserRole,
    /// When this session was established.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_blob_roundtrip() {
        let user = User {
            id: UserId::new(1),
            name: "Asha".to_owned(),
            email: Email::parse("asha@example.com").unwrap(),
            role: UserRole::Admin,
            logged_in_at: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_unknown_role_still_parses() {
        let json = r#"{"id": 7, "name": "Sam", "email": "sam@example.com", "role": "owner"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::Customer);
    }
}
