//! Greengrocer Core - Shared types library.
//!
//! This crate provides the common types used across all Greengrocer
//! components:
//! - `engine` - The storefront state engine (catalog, cart, session)
//! - `integration-tests` - End-to-end engine scenarios
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, roles, and the catalog/cart
//!   record types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
