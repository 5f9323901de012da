//! Cart snapshot types.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One line of the persisted cart snapshot.
///
/// Keyed by product identifier; the cart never holds two entries for the
/// same id, and an entry with quantity 0 must not exist (the engine removes
/// the line instead). Serialized with the short `qty` field name the client
/// snapshot format has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Identifier of the product this line refers to.
    pub id: ProductId,
    /// Units in the cart, always >= 1.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartEntry {
    /// Create a cart line.
    #[must_use]
    pub const fn new(id: ProductId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}
