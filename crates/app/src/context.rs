//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    api::{ApiConfig, ApiError, BannersApi, HttpApi, OrdersApi, ProductsApi},
    auth::{AuthService, Sha256Verifier},
    config::AppConfig,
    storage::{CartStorage, JsonFile},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build API client")]
    Api(#[source] ApiError),
}

/// Shared service handles, wired once from configuration.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsApi>,
    pub banners: Arc<dyn BannersApi>,
    pub orders: Arc<dyn OrdersApi>,
    pub auth: Arc<AuthService>,
    pub cart_storage: Arc<dyn CartStorage>,
}

impl AppContext {
    /// Build the application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the API client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let api = Arc::new(
            HttpApi::new(ApiConfig {
                base_url: config.api.base_url.clone(),
                timeout: Duration::from_secs(config.api.timeout_seconds),
            })
            .map_err(AppInitError::Api)?,
        );

        let verifier = Arc::new(Sha256Verifier::new(
            config.admin.username.clone(),
            config.admin.password_sha256.clone(),
        ));

        let sessions = Arc::new(JsonFile::new(&config.storage.session_path));

        Ok(Self {
            products: api.clone(),
            banners: api.clone(),
            orders: api,
            auth: Arc::new(AuthService::new(verifier, sessions)),
            cart_storage: Arc::new(JsonFile::new(&config.storage.cart_path)),
        })
    }
}
