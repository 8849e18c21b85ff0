//! Storefront catalog reads.
//!
//! Read failures never break the storefront: the backend being down degrades
//! to an empty result set with a logged warning, and the customer keeps
//! browsing whatever is available.

use std::sync::Arc;

use tracing::warn;

use tokri::products::{Product, ProductId};

use crate::api::{BannersApi, ProductsApi, data::Banner};

/// Read-side facade over the catalog and banner APIs.
#[derive(Clone)]
pub struct Catalog {
    products: Arc<dyn ProductsApi>,
    banners: Arc<dyn BannersApi>,
}

impl Catalog {
    /// Create a catalog over the given API services.
    pub fn new(products: Arc<dyn ProductsApi>, banners: Arc<dyn BannersApi>) -> Self {
        Self { products, banners }
    }

    /// All products, or an empty list when the backend is unavailable.
    pub async fn storefront_products(&self) -> Vec<Product> {
        match self.products.list_products().await {
            Ok(products) => products,
            Err(error) => {
                warn!("product catalog unavailable: {error}");
                Vec::new()
            }
        }
    }

    /// Search results, or an empty list when the backend is unavailable.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        match self.products.search_products(query).await {
            Ok(products) => products,
            Err(error) => {
                warn!("product search unavailable: {error}");
                Vec::new()
            }
        }
    }

    /// A single product, or `None` when it is missing or the backend is
    /// unavailable.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        match self.products.get_product(id).await {
            Ok(product) => Some(product),
            Err(error) => {
                warn!("product {id} unavailable: {error}");
                None
            }
        }
    }

    /// Banners currently switched on, or an empty list when the backend is
    /// unavailable.
    pub async fn active_banners(&self) -> Vec<Banner> {
        match self.banners.list_banners().await {
            Ok(banners) => banners.into_iter().filter(|banner| banner.active).collect(),
            Err(error) => {
                warn!("banners unavailable: {error}");
                Vec::new()
            }
        }
    }
}
