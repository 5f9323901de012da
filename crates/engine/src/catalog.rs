//! Catalog service gateway.
//!
//! The engine treats the catalog service as the source of truth for product
//! records: [`CatalogGateway::list`] returns the full current catalog, and
//! the mutation calls accept create/update/delete by product identifier.
//! Transport failures surface as [`GatewayError`] and the engine treats them
//! as "the operation did not happen".

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use greengrocer_core::{Product, ProductFields, ProductId};

use crate::config::CatalogConfig;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("catalog service returned {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Remote source of product records.
///
/// Futures returned by these methods need not be `Send`; the engine drives
/// one operation at a time on a single logical thread.
#[allow(async_fn_in_trait)]
pub trait CatalogGateway {
    /// Fetch the full current catalog.
    async fn list(&self) -> Result<Vec<Product>, GatewayError>;

    /// Create a product; the service assigns the identifier.
    async fn create(&self, fields: &ProductFields) -> Result<(), GatewayError>;

    /// Replace the display fields of an existing product.
    async fn update(&self, id: ProductId, fields: &ProductFields) -> Result<(), GatewayError>;

    /// Delete a product by identifier.
    async fn delete(&self, id: ProductId) -> Result<(), GatewayError>;
}

// =============================================================================
// HttpCatalogGateway
// =============================================================================

/// JSON REST client for the catalog service.
///
/// Products live under `{base_url}/products`.
#[derive(Clone)]
pub struct HttpCatalogGateway {
    inner: Arc<HttpCatalogGatewayInner>,
}

struct HttpCatalogGatewayInner {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCatalogGateway {
    /// Create a new catalog service client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let endpoint = format!(
            "{}/products",
            config.base_url.as_str().trim_end_matches('/')
        );

        Self {
            inner: Arc::new(HttpCatalogGatewayInner {
                client: reqwest::Client::new(),
                endpoint,
            }),
        }
    }

    fn item_endpoint(&self, id: ProductId) -> String {
        format!("{}/{id}", self.inner.endpoint)
    }

    /// Map a response to `()` or a status error, logging the body on failure.
    async fn check_status(response: reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %body.chars().take(200).collect::<String>(),
            "catalog service returned non-success status"
        );
        Err(GatewayError::Status(status))
    }
}

impl CatalogGateway for HttpCatalogGateway {
    async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        let response = self.inner.client.get(&self.inner.endpoint).send().await?;

        let status = response.status();
        // Body as text first for better diagnostics on parse failures
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "catalog service returned non-success status"
            );
            return Err(GatewayError::Status(status));
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse catalog listing"
            );
            GatewayError::Parse(e)
        })?;

        debug!(count = products.len(), "fetched catalog");
        Ok(products)
    }

    async fn create(&self, fields: &ProductFields) -> Result<(), GatewayError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(fields)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn update(&self, id: ProductId, fields: &ProductFields) -> Result<(), GatewayError> {
        let response = self
            .inner
            .client
            .put(self.item_endpoint(id))
            .json(fields)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), GatewayError> {
        let response = self
            .inner
            .client
            .delete(self.item_endpoint(id))
            .send()
            .await?;
        Self::check_status(response).await
    }
}
