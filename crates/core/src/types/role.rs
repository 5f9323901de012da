//! User roles for session-gated access.

use serde::{Deserialize, Serialize};

/// Role carried by a logged-in user record.
///
/// Stored session blobs are produced by external login flows, so any role
/// string other than `"admin"` deserializes as [`UserRole::Customer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access, including the administrative catalog screens.
    Admin,
    /// Ordinary shopper.
    #[default]
    #[serde(other)]
    Customer,
}

impl UserRole {
    /// Whether this role may enter administrative screens.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
