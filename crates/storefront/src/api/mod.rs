//! Backend API client.
//!
//! Thin reqwest wrapper over the excluded backend collaborator. Fetches
//! are fire-and-forget from the pages' point of view: no retries, no
//! cancellation, and the transport timeout comes from configuration.

mod conversions;
mod types;

use std::sync::Arc;

use origami_core::ProductId;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::browse::ProductCard;
use crate::catalog::{Product, Variant, VariantCatalog};
use crate::config::StoreConfig;
use crate::page::ProductPage;

use conversions::{convert_card, convert_product, convert_variant};
use types::{ProductDto, VariantDto};

/// Errors from the backend API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Network or protocol failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an unexpected status.
    #[error("unexpected status {status} from {path}")]
    Status { status: u16, path: String },

    /// The payload decoded but is missing required fields.
    #[error("unexpected payload from {0}")]
    InvalidPayload(String),
}

/// Client for the backend product API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be constructed.
    pub fn new(config: &StoreConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    /// Fetch the product listing as browse cards.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<ProductCard>, ApiError> {
        let dtos: Vec<ProductDto> = self.get_json("/api/Producto").await?;
        Ok(dtos.into_iter().filter_map(convert_card).collect())
    }

    /// Fetch one product's header data.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let path = format!("/api/Producto/{id}");
        let dto: ProductDto = self.get_json(&path).await?;
        convert_product(dto).ok_or(ApiError::InvalidPayload(path))
    }

    /// Fetch one product's variants.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown product; an existing
    /// product with no variants yields an empty list, which callers
    /// surface as disabled purchase controls.
    #[instrument(skip(self))]
    pub async fn variants(&self, id: ProductId) -> Result<Vec<Variant>, ApiError> {
        let path = format!("/api/Producto/{id}/variantes");
        let dtos: Vec<VariantDto> = self.get_json(&path).await?;
        Ok(dtos
            .into_iter()
            .filter_map(|dto| convert_variant(id, dto))
            .collect())
    }

    /// Fetch everything the product detail page needs and assemble its
    /// state machine.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when either fetch fails.
    #[instrument(skip(self))]
    pub async fn product_page(&self, id: ProductId) -> Result<ProductPage, ApiError> {
        let product = self.product(id).await?;
        let variants = self.variants(id).await?;
        Ok(ProductPage::new(product, VariantCatalog::new(variants)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        debug!(%url, "GET");
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}
