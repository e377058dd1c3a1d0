//! REST client for the remote catalog service.
//!
//! Uses `reqwest` for HTTP and `moka` to cache listing pages for a short TTL
//! so back-and-forth navigation over the same (parameters, page) tuple does
//! not issue duplicate requests. Favorites and cart are member-scoped mutable
//! state and are never cached here.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};
use url::Url;

use async_trait::async_trait;
use saffron_core::{CartSnapshot, FilterCriteria, PageResult, Product, ProductId};

use super::wire::{CartEnvelope, ErrorBody, FavoritesList, FavoritesPage, PagedProducts};
use super::{CatalogApi, FILTERED_PAGE_LIMIT};
use crate::config::StorefrontConfig;
use crate::error::ApiError;

// =============================================================================
// RestClient
// =============================================================================

/// Client for the remote catalog REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the listing
/// cache.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    http: reqwest::Client,
    base_url: Url,
    session_token: Option<SecretString>,
    listing_cache: Cache<String, PageResult<Product>>,
}

impl RestClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let listing_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(RestClientInner {
                http: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                session_token: config.session_token.clone(),
                listing_cache,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.session_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Send a request and return the response body, mapping non-success
    /// statuses to `ApiError::Server` with the payload message preserved.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: extract_server_message(status, &text),
            });
        }

        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let text = self.execute(self.inner.http.get(url)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch_listing(&self, cache_key: String, url: Url) -> Result<PageResult<Product>, ApiError> {
        if let Some(hit) = self.inner.listing_cache.get(&cache_key).await {
            debug!("cache hit for listing page");
            return Ok(hit);
        }

        let page: PageResult<Product> = self.get_json::<PagedProducts>(url).await?.into();

        self.inner
            .listing_cache
            .insert(cache_key, page.clone())
            .await;

        Ok(page)
    }

    /// Drop all cached listing pages.
    pub async fn invalidate_listings(&self) {
        self.inner.listing_cache.invalidate_all();
        self.inner.listing_cache.run_pending_tasks().await;
    }
}

/// Pull the server's message out of an error payload, falling back to the
/// raw body or status line when the payload gives nothing usable.
fn extract_server_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && !parsed.message.is_empty()
    {
        return parsed.message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.chars().take(200).collect()
    }
}

// =============================================================================
// CatalogApi implementation
// =============================================================================

#[async_trait]
impl CatalogApi for RestClient {
    #[instrument(skip(self))]
    async fn listing(&self, page: u32, limit: u32) -> Result<PageResult<Product>, ApiError> {
        let mut url = self.endpoint("products")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        self.fetch_listing(format!("products:{page}:{limit}"), url)
            .await
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn listing_by_category(
        &self,
        category: &str,
        page: u32,
        limit: u32,
    ) -> Result<PageResult<Product>, ApiError> {
        let path = format!("products/category/{}", urlencoding::encode(category));
        let mut url = self.endpoint(&path)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        self.fetch_listing(format!("category:{category}:{page}:{limit}"), url)
            .await
    }

    #[instrument(skip(self, filter))]
    async fn listing_filtered(
        &self,
        filter: &FilterCriteria,
        page: u32,
    ) -> Result<PageResult<Product>, ApiError> {
        let mut url = self.endpoint("products/filter")?;
        url.query_pairs_mut()
            .append_pair("title", &filter.title_query)
            .append_pair("price", &filter.max_price.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("limit", &FILTERED_PAGE_LIMIT.to_string());

        // Filtered results are search-like and not cached, mirroring the
        // listing cache's "reads only, never searches" policy.
        Ok(self.get_json::<PagedProducts>(url).await?.into())
    }

    #[instrument(skip(self))]
    async fn favorites(&self, page: u32) -> Result<PageResult<Product>, ApiError> {
        let mut url = self.endpoint("favorites")?;
        url.query_pairs_mut().append_pair("page", &page.to_string());

        Ok(self
            .get_json::<FavoritesPage>(url)
            .await?
            .into_page_result(page))
    }

    #[instrument(skip(self))]
    async fn all_favorite_ids(&self) -> Result<Vec<ProductId>, ApiError> {
        let url = self.endpoint("favorites/all")?;
        Ok(self.get_json::<FavoritesList>(url).await?.into_ids())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn add_favorite(&self, id: &ProductId) -> Result<Vec<ProductId>, ApiError> {
        let url = self.endpoint(&format!("favorites/{id}"))?;
        let text = self.execute(self.inner.http.post(url)).await?;
        Ok(serde_json::from_str::<FavoritesList>(&text)?.into_ids())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn remove_favorite(&self, id: &ProductId) -> Result<Vec<ProductId>, ApiError> {
        let url = self.endpoint(&format!("favorites/{id}"))?;
        let text = self.execute(self.inner.http.delete(url)).await?;
        Ok(serde_json::from_str::<FavoritesList>(&text)?.into_ids())
    }

    #[instrument(skip(self))]
    async fn clear_favorites(&self) -> Result<(), ApiError> {
        let url = self.endpoint("favorites")?;
        self.execute(self.inner.http.delete(url)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn cart(&self, page: u32) -> Result<CartSnapshot, ApiError> {
        let mut url = self.endpoint("cart")?;
        url.query_pairs_mut().append_pair("page", &page.to_string());

        Ok(self
            .get_json::<CartEnvelope>(url)
            .await?
            .into_snapshot(page))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn add_to_cart(&self, id: &ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/{id}"))?;
        self.execute(self.inner.http.post(url)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn edit_cart_quantity(&self, id: &ProductId, quantity: u32) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/{id}"))?;
        let request = self
            .inner
            .http
            .put(url)
            .json(&json!({ "quantity": quantity }));
        self.execute(request).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = id.map(ProductId::as_str)))]
    async fn remove_from_cart(&self, id: Option<&ProductId>) -> Result<(), ApiError> {
        let url = match id {
            Some(id) => self.endpoint(&format!("cart/{id}"))?,
            // No id clears the whole cart
            None => self.endpoint("cart")?,
        };
        self.execute(self.inner.http.delete(url)).await?;
        Ok(())
    }
}
