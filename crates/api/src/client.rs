use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use seamart_core::{ClientConfig, FeedItem, FeedQuery};

use crate::api_types::PaginatedDocs;
use crate::error::ApiError;

pub const DEFAULT_USER_AGENT: &str = concat!("seamart/", env!("CARGO_PKG_VERSION"));

/// Maximum body length echoed back inside error messages.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Client for the marketplace REST endpoints.
pub struct FeedClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl FeedClient {
    /// Creates a client for `base_url` (e.g. `https://host/api`).
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed or the HTTP client cannot
    /// be built (TLS backend failure).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::ClientInit(format!("invalid base url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::ClientInit(format!("base url '{base_url}' cannot hold paths")));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url, token: None })
    }

    /// # Errors
    /// See [`FeedClient::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))?
            .with_token(config.api_token.clone()))
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetches one feed page: `GET {base}/feed?page=&limit=[&filter=]`.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or an
    /// undecodable body.
    pub async fn feed_page(&self, query: &FeedQuery) -> Result<Vec<FeedItem>, ApiError> {
        let url = self.endpoint(&["feed"])?;
        let mut params = vec![("page", query.page.to_string()), ("limit", query.page_size.to_string())];
        if let Some(filter) = query.filter.as_deref().filter(|f| !f.is_empty()) {
            params.push(("filter", filter.to_owned()));
        }
        let docs: PaginatedDocs<FeedItem> = self.get_json(url, &params, "feed page").await?;
        tracing::debug!(
            page = query.page,
            limit = query.page_size,
            filter = query.filter.as_deref().unwrap_or(""),
            returned = docs.docs.len(),
            "Fetched feed page"
        );
        Ok(docs.docs)
    }

    /// First page of search results: `GET {base}/search?q=&page=1&limit=`.
    ///
    /// # Errors
    /// Rejects a blank query without a network call; otherwise as
    /// [`FeedClient::feed_page`].
    pub async fn search_items(&self, text: &str, page_size: u32) -> Result<Vec<FeedItem>, ApiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::InvalidRequest("search query is empty".to_owned()));
        }
        let url = self.endpoint(&["search"])?;
        let params = [
            ("q", text.to_owned()),
            ("page", "1".to_owned()),
            ("limit", page_size.to_string()),
        ];
        let docs: PaginatedDocs<FeedItem> = self.get_json(url, &params, "search results").await?;
        tracing::debug!(query = text, returned = docs.docs.len(), "Fetched search results");
        Ok(docs.docs)
    }

    /// Single item: `GET {base}/items/{id}`.
    ///
    /// # Errors
    /// A missing item surfaces as `HttpStatus { code: 404, .. }`.
    pub async fn fetch_item(&self, id: &str) -> Result<FeedItem, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidRequest("item id is empty".to_owned()));
        }
        let url = self.endpoint(&["items", id])?;
        self.get_json(url, &[], "item").await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::ClientInit("base url cannot hold paths".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
        context: &str,
    ) -> Result<T, ApiError> {
        let mut request = self.client.get(url).query(params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::JsonParse {
            context: format!("{context} (body: {})", truncate(&body, 200)),
            source: e,
        })
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
