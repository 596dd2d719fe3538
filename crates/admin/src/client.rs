//! Admin API client.
//!
//! Login validates against the configured credentials and mints a local
//! bearer token, exactly the scheme the admin pages use; the token rides
//! along on every catalog-management call.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::session::{AdminSession, SessionStore};
use crate::types::{
    AdminProduct, AdminVariant, Category, CategoryPayload, Listing, ProductPayload, VariantPayload,
};

/// Client for the back-office catalog API.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    config: AdminConfig,
    sessions: SessionStore,
}

impl AdminClient {
    /// Create a client; picks up a persisted session if one is valid.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the HTTP client cannot be constructed.
    pub fn new(config: AdminConfig) -> Result<Self, AdminError> {
        let client = reqwest::Client::builder().build()?;
        let sessions = SessionStore::new(config.session_path.clone());
        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                config,
                sessions,
            }),
        })
    }

    /// Authenticate and persist a fresh eight-hour session.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidCredentials` on a wrong pair.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession, AdminError> {
        let config = &self.inner.config;
        if username != config.username || password != config.password.expose_secret() {
            return Err(AdminError::InvalidCredentials);
        }
        let session = AdminSession::start(username);
        self.inner.sessions.save(&session)?;
        debug!(username, "admin session started");
        Ok(session)
    }

    /// Drop the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` when the session file cannot be removed.
    pub fn logout(&self) -> Result<(), AdminError> {
        self.inner.sessions.clear()
    }

    /// The current valid session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` when the session store cannot be read.
    pub fn session(&self) -> Result<Option<AdminSession>, AdminError> {
        self.inner.sessions.load()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<AdminProduct>, AdminError> {
        let listing: Listing<AdminProduct> = self.get("/api/Producto").await?;
        Ok(listing.into_items())
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), AdminError> {
        self.send(reqwest::Method::POST, "/api/Producto", Some(payload))
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self, payload))]
    pub async fn update_product(&self, id: i32, payload: &ProductPayload) -> Result<(), AdminError> {
        self.send(
            reqwest::Method::PUT,
            &format!("/api/Producto/{id}"),
            Some(payload),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<(), AdminError> {
        self.send::<()>(reqwest::Method::DELETE, &format!("/api/Producto/{id}"), None)
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, AdminError> {
        let listing: Listing<Category> = self.get("/api/Categoria").await?;
        Ok(listing.into_items())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self, payload))]
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<(), AdminError> {
        self.send(reqwest::Method::POST, "/api/Categoria", Some(payload))
            .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self, payload))]
    pub async fn update_category(
        &self,
        id: i32,
        payload: &CategoryPayload,
    ) -> Result<(), AdminError> {
        self.send(
            reqwest::Method::PUT,
            &format!("/api/Categoria/{id}"),
            Some(payload),
        )
        .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i32) -> Result<(), AdminError> {
        self.send::<()>(
            reqwest::Method::DELETE,
            &format!("/api/Categoria/{id}"),
            None,
        )
        .await
    }

    // =========================================================================
    // Variants
    // =========================================================================

    /// List one product's variants.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self))]
    pub async fn variants(&self, product_id: i32) -> Result<Vec<AdminVariant>, AdminError> {
        let listing: Listing<AdminVariant> = self
            .get(&format!("/api/Producto/{product_id}/variantes"))
            .await?;
        Ok(listing.into_items())
    }

    /// Fetch one variant.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self))]
    pub async fn variant(&self, id: i32) -> Result<AdminVariant, AdminError> {
        self.get(&format!("/api/Variante/{id}")).await
    }

    /// Create a variant.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self, payload))]
    pub async fn create_variant(&self, payload: &VariantPayload) -> Result<(), AdminError> {
        self.send(reqwest::Method::POST, "/api/Variante", Some(payload))
            .await
    }

    /// Update a variant.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self, payload))]
    pub async fn update_variant(&self, id: i32, payload: &VariantPayload) -> Result<(), AdminError> {
        self.send(
            reqwest::Method::PUT,
            &format!("/api/Variante/{id}"),
            Some(payload),
        )
        .await
    }

    /// Delete a variant.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` on auth or transport failure.
    #[instrument(skip(self))]
    pub async fn delete_variant(&self, id: i32) -> Result<(), AdminError> {
        self.send::<()>(reqwest::Method::DELETE, &format!("/api/Variante/{id}"), None)
            .await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn bearer_token(&self) -> Result<String, AdminError> {
        self.inner
            .sessions
            .load()?
            .map(|session| session.token)
            .ok_or(AdminError::NotAuthenticated)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdminError> {
        let token = self.bearer_token()?;
        let url = format!("{}{}", self.inner.config.api_url, path);
        debug!(%url, "GET");
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AdminError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(AdminError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), AdminError> {
        let token = self.bearer_token()?;
        let url = format!("{}{}", self.inner.config.api_url, path);
        debug!(%url, %method, "send");
        let mut request = self
            .inner
            .client
            .request(method, &url)
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AdminError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(AdminError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn config() -> AdminConfig {
        AdminConfig {
            api_url: "http://localhost:5015".to_string(),
            username: "admin".to_string(),
            password: SecretString::from("origami2025"),
            session_path: std::env::temp_dir().join(format!("origami-admin-{}.json", Uuid::new_v4())),
        }
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let client = AdminClient::new(config()).expect("client");
        let err = client.login("admin", "wrong").expect_err("must fail");
        assert!(matches!(err, AdminError::InvalidCredentials));
        assert!(client.session().expect("load").is_none());
    }

    #[test]
    fn test_login_persists_session() {
        let cfg = config();
        let path = cfg.session_path.clone();
        let client = AdminClient::new(cfg).expect("client");
        let session = client.login("admin", "origami2025").expect("login");
        assert!(session.is_valid());

        let reloaded = client.session().expect("load").expect("session");
        assert_eq!(reloaded, session);

        client.logout().expect("logout");
        assert!(client.session().expect("load").is_none());
        assert!(!PathBuf::from(path).exists());
    }

    #[tokio::test]
    async fn test_calls_without_session_are_rejected() {
        let client = AdminClient::new(config()).expect("client");
        let err = client.products().await.expect_err("must fail");
        assert!(matches!(err, AdminError::NotAuthenticated));
    }
}
