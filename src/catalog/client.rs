//! HTTP implementation of [`CatalogApi`].
//!
//! All calls go through one reqwest client with a cookie store enabled: the
//! service authenticates with an HTTP-only cookie set by `/auth/login`, and
//! every later call must carry it back.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{FetchDogError, Result};

use super::error::ApiError;
use super::{CatalogApi, CatalogOperation, Credentials, DogRecord, SearchPage, SearchQuery};

#[derive(Debug, Deserialize)]
struct MatchResponse {
    #[serde(rename = "match")]
    matched: String,
}

/// Catalog client speaking to the remote REST service
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl CatalogClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds every request end to end.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FetchDogError::Config(format!(
                "base URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchDogError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url(), config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Send a request and reject non-success statuses.
    async fn send(&self, operation: CatalogOperation, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, operation, self.timeout))?;

        let status = response.status();
        debug!(%operation, status = status.as_u16(), "catalog response");

        if !status.is_success() {
            return Err(ApiError::from_status(status, operation).into());
        }
        Ok(response)
    }

    async fn send_json(&self, operation: CatalogOperation, request: RequestBuilder) -> Result<Value> {
        let response = self.send(operation, request).await?;
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::from_transport(&e, operation, self.timeout))?;
        Ok(body)
    }
}

/// Interpret a search response body.
///
/// Only a JSON list under `resultIds` counts as a result; anything else marks
/// the page as malformed. Non-string entries are dropped.
pub(crate) fn parse_search_page(body: &Value) -> SearchPage {
    let result_ids = body
        .get("resultIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| match id {
                    Value::String(s) => Some(s.clone()),
                    other => {
                        warn!("ignoring non-string result id: {other}");
                        None
                    }
                })
                .collect()
        });

    SearchPage {
        result_ids,
        total: body.get("total").and_then(Value::as_u64),
    }
}

/// Interpret a record fetch response body, coercing non-lists to empty.
pub(crate) fn parse_records(body: Value) -> Result<Vec<DogRecord>> {
    if !body.is_array() {
        warn!("dog fetch returned a non-list body, treating as empty");
        return Ok(Vec::new());
    }

    serde_json::from_value(body).map_err(|e| {
        FetchDogError::fetch(
            CatalogOperation::FetchRecords,
            format!("unexpected record format: {e}"),
        )
    })
}

impl CatalogApi for CatalogClient {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let url = self.endpoint("/auth/login");
        debug!(%url, name = %credentials.name, "logging in");
        self.send(
            CatalogOperation::Login,
            self.client.post(&url).json(credentials),
        )
        .await?;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let url = self.endpoint("/auth/logout");
        debug!(%url, "logging out");
        self.send(CatalogOperation::Logout, self.client.post(&url).json(&json!({})))
            .await?;
        Ok(())
    }

    async fn list_breeds(&self) -> Result<Vec<String>> {
        let url = self.endpoint("/dogs/breeds");
        debug!(%url, "fetching breeds");
        let body = self
            .send_json(CatalogOperation::ListBreeds, self.client.get(&url))
            .await?;
        serde_json::from_value(body).map_err(|e| {
            FetchDogError::fetch(
                CatalogOperation::ListBreeds,
                format!("unexpected breed list format: {e}"),
            )
        })
    }

    async fn search_ids(&self, query: &SearchQuery) -> Result<SearchPage> {
        let url = self.endpoint("/dogs/search");
        debug!(%url, ?query, "searching dogs");
        let body = self
            .send_json(
                CatalogOperation::SearchIds,
                self.client.get(&url).query(&query.to_query_pairs()),
            )
            .await?;
        Ok(parse_search_page(&body))
    }

    async fn fetch_records(&self, ids: &[String]) -> Result<Vec<DogRecord>> {
        let url = self.endpoint("/dogs");
        debug!(%url, count = ids.len(), "fetching dog records");
        let body = self
            .send_json(CatalogOperation::FetchRecords, self.client.post(&url).json(ids))
            .await?;
        parse_records(body)
    }

    async fn request_match(&self, favorite_ids: &[String]) -> Result<String> {
        let url = self.endpoint("/dogs/match");
        debug!(%url, count = favorite_ids.len(), "requesting match");
        let body = self
            .send_json(
                CatalogOperation::RequestMatch,
                self.client.post(&url).json(favorite_ids),
            )
            .await?;
        let response: MatchResponse = serde_json::from_value(body).map_err(|e| {
            FetchDogError::fetch(
                CatalogOperation::RequestMatch,
                format!("unexpected match format: {e}"),
            )
        })?;
        Ok(response.matched)
    }
}
