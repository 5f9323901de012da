//! Named screens driven by engine state.
//!
//! The view selector is a finite set of screens; transitions are
//! user-triggered and gated only by session role for the administrative
//! screens. Rendering belongs to the presentation layer, which consumes
//! [`View`] and the engine accessors.

use greengrocer_core::{ProductId, UserRole};

/// The screen the client is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Product listing, available to everyone.
    #[default]
    Browsing,
    /// Cart contents.
    Cart,
    /// Login form.
    Login,
    /// Signup form.
    Signup,
    /// Administrative product listing.
    AdminCatalog,
    /// Product form: `None` is the blank "add product" form, `Some(id)` is
    /// the pre-filled edit form for an existing product.
    AdminEdit(Option<ProductId>),
}

impl View {
    /// Whether entering this screen requires an admin session.
    #[must_use]
    pub const fn requires_admin(self) -> bool {
        matches!(self, Self::AdminCatalog | Self::AdminEdit(_))
    }

    /// The screen shown right after a session is established.
    #[must_use]
    pub const fn landing_for(role: UserRole) -> Self {
        if role.is_admin() {
            Self::AdminCatalog
        } else {
            Self::Browsing
        }
    }
}
