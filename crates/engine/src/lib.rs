//! Greengrocer Engine - client-side storefront state controller.
//!
//! The engine owns the authoritative in-memory view of the product catalog,
//! the cart derived from it, and the active session, and keeps the three
//! mutually consistent across catalog loads, user actions, and process
//! restarts.
//!
//! # Architecture
//!
//! Two leaf collaborators sit behind traits:
//!
//! - [`catalog::CatalogGateway`] - fetches and mutates product records on the
//!   remote catalog service ([`catalog::HttpCatalogGateway`] speaks JSON REST)
//! - [`store::StateStore`] - durable key/value blobs for the session and the
//!   cart snapshot, scoped to one client installation
//!
//! [`engine::Storefront`] depends on both and exposes the whole command
//! surface; the presentation layer consumes its accessors and [`view::View`]
//! and renders, nothing more.
//!
//! # Example
//!
//! ```rust,ignore
//! use greengrocer_engine::{EngineConfig, FileStore, HttpCatalogGateway, Storefront};
//!
//! let config = EngineConfig::from_env()?;
//! let gateway = HttpCatalogGateway::new(&config.catalog);
//! let store = FileStore::new(&config.data_dir);
//!
//! let mut shop = Storefront::new(gateway, store);
//! shop.restore().await;
//!
//! shop.add_to_cart(product_id).await?;
//! shop.increment(product_id).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;
pub mod view;

pub use catalog::{CatalogGateway, GatewayError, HttpCatalogGateway};
pub use config::{CatalogConfig, ConfigError, EngineConfig};
pub use engine::Storefront;
pub use error::EngineError;
pub use store::{FileStore, MemoryStore, StateStore, StoreError, keys};
pub use view::View;
