//! API service traits and the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use tokri::{
    order::{OrderId, OrderRecord, OrderStatus},
    products::{Product, ProductId},
};

use crate::api::{
    ApiError,
    data::{Banner, BannerId, BannerUpdate, NewBanner, NewProduct, OrderStatusUpdate, ProductUpdate},
};

#[automock]
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// Fetch the full product catalog.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// Full-text product search.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError>;

    /// Create a catalog entry.
    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError>;

    /// Apply a partial update to a catalog entry.
    async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError>;

    /// Delete a catalog entry.
    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError>;
}

#[automock]
#[async_trait]
pub trait BannersApi: Send + Sync {
    /// Fetch all banners, active or not.
    async fn list_banners(&self) -> Result<Vec<Banner>, ApiError>;

    /// Create a banner.
    async fn create_banner(&self, banner: &NewBanner) -> Result<Banner, ApiError>;

    /// Apply a partial update to a banner.
    async fn update_banner(&self, id: &BannerId, update: &BannerUpdate)
    -> Result<Banner, ApiError>;

    /// Delete a banner.
    async fn delete_banner(&self, id: &BannerId) -> Result<(), ApiError>;
}

#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Fetch orders, optionally filtered by status.
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<OrderRecord>, ApiError>;

    /// Submit a new order. Only HTTP 201 counts as success; any other
    /// response leaves the caller free to retry.
    async fn create_order(&self, order: &OrderRecord) -> Result<OrderRecord, ApiError>;

    /// Patch an order's status and tracking details.
    async fn update_order(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<OrderRecord, ApiError>;

    /// Delete an order.
    async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError>;
}

/// Connection settings for the backend API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `"http://localhost:5000"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the storefront backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: ApiConfig,
    http: Client,
}

impl HttpApi {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn expect_success(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status(response.status()))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json().await.map_err(ApiError::Body)
    }
}

#[async_trait]
impl ProductsApi for HttpApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.http.get(self.url("/products")).send().await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/products/{id}")))
            .send()
            .await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http
            .get(self.url("/products/search"))
            .query(&[("q", query)])
            .send()
            .await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let response = self
            .http
            .post(self.url("/products"))
            .json(product)
            .send()
            .await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/products/{id}")))
            .json(update)
            .send()
            .await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/products/{id}")))
            .send()
            .await?;

        Self::expect_success(response)?;

        Ok(())
    }
}

#[async_trait]
impl BannersApi for HttpApi {
    async fn list_banners(&self) -> Result<Vec<Banner>, ApiError> {
        let response = self.http.get(self.url("/banners")).send().await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn create_banner(&self, banner: &NewBanner) -> Result<Banner, ApiError> {
        let response = self
            .http
            .post(self.url("/banners"))
            .json(banner)
            .send()
            .await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn update_banner(
        &self,
        id: &BannerId,
        update: &BannerUpdate,
    ) -> Result<Banner, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/banners/{id}")))
            .json(update)
            .send()
            .await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn delete_banner(&self, id: &BannerId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/banners/{id}")))
            .send()
            .await?;

        Self::expect_success(response)?;

        Ok(())
    }
}

#[async_trait]
impl OrdersApi for HttpApi {
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<OrderRecord>, ApiError> {
        let mut request = self.http.get(self.url("/orders"));

        if let Some(status) = status {
            request = request.query(&[("status", status.to_string())]);
        }

        let response = request.send().await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn create_order(&self, order: &OrderRecord) -> Result<OrderRecord, ApiError> {
        let response = self
            .http
            .post(self.url("/orders"))
            .json(order)
            .send()
            .await?;

        // Order creation succeeds on 201 and nothing else.
        if response.status() != StatusCode::CREATED {
            return Err(ApiError::Status(response.status()));
        }

        Self::decode(response).await
    }

    async fn update_order(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<OrderRecord, ApiError> {
        let response = self
            .http
            .patch(self.url(&format!("/orders/{id}")))
            .json(update)
            .send()
            .await?;

        Self::decode(Self::expect_success(response)?).await
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/orders/{id}")))
            .send()
            .await?;

        Self::expect_success(response)?;

        Ok(())
    }
}
