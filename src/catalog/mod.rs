//! Remote dog catalog access.
//!
//! This module defines the data returned by the catalog service and the
//! [`CatalogApi`] trait through which the rest of the crate talks to it.
//! [`CatalogClient`] is the HTTP implementation; tests substitute their own.

pub mod client;
pub mod error;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FetchDogError, Result};

pub use client::CatalogClient;

/// Base URL of the public catalog service
pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// A single dog as returned by `POST /dogs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRecord {
    /// Catalog-wide unique identifier
    pub id: String,
    /// Image URL
    pub img: String,
    pub name: String,
    pub age: u32,
    /// Postal code of the shelter
    pub zip_code: String,
    pub breed: String,
}

/// Sort direction applied to the breed field
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Value of the `sort` query parameter, e.g. `breed:asc`
    pub fn as_query_param(&self) -> String {
        format!("breed:{self}")
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = FetchDogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(FetchDogError::Validation(format!(
                "invalid sort order '{s}', expected 'asc' or 'desc'"
            ))),
        }
    }
}

/// Login credentials proxied to the auth endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub name: String,
    pub email: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Parameters of a `GET /dogs/search` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Breeds to filter by; empty means no filter
    pub breeds: Vec<String>,
    pub sort: SortOrder,
    pub size: u32,
    /// Offset of the first result
    pub from: u64,
}

impl SearchQuery {
    /// Encode as query pairs. `breeds[]` is repeated once per breed and left
    /// out entirely when there is no breed filter.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .breeds
            .iter()
            .map(|breed| ("breeds[]", breed.clone()))
            .collect();
        pairs.push(("sort", self.sort.as_query_param()));
        pairs.push(("size", self.size.to_string()));
        pairs.push(("from", self.from.to_string()));
        pairs
    }
}

/// Result of a search call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Matching identifiers; `None` when the service did not return a list
    pub result_ids: Option<Vec<String>>,
    /// Total number of matches reported by the service, if any
    pub total: Option<u64>,
}

impl SearchPage {
    pub fn malformed() -> Self {
        Self::default()
    }
}

/// Catalog calls, used to label errors and log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOperation {
    Login,
    Logout,
    ListBreeds,
    SearchIds,
    FetchRecords,
    RequestMatch,
}

impl fmt::Display for CatalogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogOperation::Login => "login",
            CatalogOperation::Logout => "logout",
            CatalogOperation::ListBreeds => "breed list",
            CatalogOperation::SearchIds => "dog search",
            CatalogOperation::FetchRecords => "dog fetch",
            CatalogOperation::RequestMatch => "match",
        };
        write!(f, "{name}")
    }
}

/// Common interface for the remote catalog
pub trait CatalogApi: Send + Sync {
    /// Authenticate; the service answers with a session cookie
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<()>> + Send;

    /// End the remote session
    fn logout(&self) -> impl Future<Output = Result<()>> + Send;

    /// All known breed names, in service order
    fn list_breeds(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Identifiers of the dogs matching the query
    fn search_ids(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchPage>> + Send;

    /// Full records for the given identifiers
    fn fetch_records(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<DogRecord>>> + Send;

    /// Ask the service to pick one dog out of the favorites
    fn request_match(
        &self,
        favorite_ids: &[String],
    ) -> impl Future<Output = Result<String>> + Send;
}
