//! Catalog product types.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Display data for a product.
///
/// The engine passes these fields through untouched; only the identifier and
/// the cart annotation on [`Product`] participate in reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    /// Product title shown in listings.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL, if the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Plain text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A product as held by the engine.
///
/// `quantity_in_cart` is an engine-local annotation: it never travels to the
/// catalog service and is recomputed from the cart snapshot after every
/// catalog replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier assigned by the catalog service.
    pub id: ProductId,
    /// Display fields, opaque to reconciliation.
    #[serde(flatten)]
    pub fields: ProductFields,
    /// Units of this product currently in the cart.
    #[serde(skip)]
    pub quantity_in_cart: u32,
}

impl Product {
    /// Create a product with an empty cart annotation.
    #[must_use]
    pub const fn new(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            fields,
            quantity_in_cart: 0,
        }
    }
}
