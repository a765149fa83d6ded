//! The product home feed
//!
//! Categories and products come from the shop backend through the host [`ShopHttpClient`];
//! search is a client-side filter over the fetched products. The promotional banners are a
//! fixed list rotated by [`BannerCarousel`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::primitives::config::current_config;
use crate::primitives::http_client::{with_timeout, HttpError, ShopHttpClient};

mod carousel;

pub use carousel::{Banner, BannerCarousel, BANNER_INTERVAL_MS};

/// A product category as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, uniffi::Record)]
pub struct Category {
    /// Backend id; numeric ids are kept in their decimal form
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
}

/// A product as listed by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize, uniffi::Record)]
pub struct Product {
    /// Backend id; numeric ids are kept in their decimal form
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    /// Display name, also what search matches against
    pub name: String,
    /// Image URL
    pub image: String,
    /// Price in VND
    pub price: f64,
}

/// Everything the home screen shows below the banners.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct HomeFeed {
    /// Categories, empty if they could not be loaded
    pub categories: Vec<Category>,
    /// Products
    pub products: Vec<Product>,
}

/// Errors raised by [`ProductFeed`]
#[crate::shopfront_error]
pub enum FeedError {
    /// The request failed or timed out
    #[error(transparent)]
    Http(#[from] HttpError),
    /// The response body is not the expected JSON list
    #[error("unexpected {resource} payload: {message}")]
    Decode {
        /// Path of the resource, e.g. `products`
        resource: String,
        /// The error message from `serde_json`
        message: String,
    },
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(number) => number.to_string(),
        RawId::Text(text) => text,
    })
}

/// Products whose name contains `query`, ignoring case. An empty query keeps everything.
#[uniffi::export]
#[must_use]
pub fn filter_products(products: Vec<Product>, query: &str) -> Vec<Product> {
    if query.is_empty() {
        return products;
    }

    let query = query.to_lowercase();
    products
        .into_iter()
        .filter(|product| product.name.to_lowercase().contains(&query))
        .collect()
}

/// Client for the shop backend's listing endpoints.
#[derive(uniffi::Object)]
pub struct ProductFeed {
    http_client: Arc<dyn ShopHttpClient>,
    base_url: String,
    timeout_seconds: u64,
}

#[crate::shopfront_export]
impl ProductFeed {
    /// Creates a feed against `base_url`, using the configured request timeout.
    #[uniffi::constructor]
    pub fn new(http_client: Arc<dyn ShopHttpClient>, base_url: &str) -> Arc<Self> {
        Arc::new(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds: current_config().request_timeout_seconds(),
        })
    }

    /// Creates a feed against the configured backend.
    #[uniffi::constructor]
    pub fn from_config(http_client: Arc<dyn ShopHttpClient>) -> Arc<Self> {
        let config = current_config();
        Arc::new(Self {
            http_client,
            base_url: config.api_base_url(),
            timeout_seconds: config.request_timeout_seconds(),
        })
    }

    /// `GET {base}/categories`
    ///
    /// # Errors
    /// `FeedError::Http` if the request fails, `FeedError::Decode` for an unexpected body.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, FeedError> {
        self.get_list("categories").await
    }

    /// `GET {base}/products`
    ///
    /// # Errors
    /// `FeedError::Http` if the request fails, `FeedError::Decode` for an unexpected body.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FeedError> {
        self.get_list("products").await
    }

    /// Fetches categories and products concurrently.
    ///
    /// Categories are decoration: if they fail the feed still loads with none.
    ///
    /// # Errors
    /// The product fetch error.
    pub async fn load_home(&self) -> Result<HomeFeed, FeedError> {
        let (categories, products) =
            futures::join!(self.fetch_categories(), self.fetch_products());

        let categories = categories.unwrap_or_else(|e| {
            crate::warn!("feed.categories_failed error={e}");
            Vec::new()
        });
        let products =
            products.inspect_err(|e| crate::error!("feed.products_failed error={e}"))?;

        crate::info!(
            "feed.loaded categories={} products={}",
            categories.len(),
            products.len()
        );
        Ok(HomeFeed {
            categories,
            products,
        })
    }
}

impl ProductFeed {
    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(&self, timeout_seconds: u64) -> Arc<Self> {
        Arc::new(Self {
            http_client: Arc::clone(&self.http_client),
            base_url: self.base_url.clone(),
            timeout_seconds,
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, FeedError> {
        let url = format!("{}/{resource}", self.base_url);
        crate::debug!("feed.request url={url}");

        let body = with_timeout(self.timeout_seconds, self.http_client.fetch(url)).await?;

        serde_json::from_slice(&body).map_err(|e| FeedError::Decode {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}
