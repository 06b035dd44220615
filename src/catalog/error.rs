//! Error conversion for catalog calls.
//!
//! Every HTTP failure is first captured as an [`ApiError`] that remembers the
//! operation and status, then mapped onto the crate error: login and logout
//! failures become [`FetchDogError::Auth`], everything else
//! [`FetchDogError::Fetch`].

use std::fmt;
use std::time::Duration;

use crate::error::FetchDogError;

use super::CatalogOperation;

/// A failed catalog call.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if the service answered
    pub status: Option<reqwest::StatusCode>,
    /// Human-readable error message
    pub message: String,
    pub operation: CatalogOperation,
}

impl ApiError {
    pub fn new(message: impl Into<String>, operation: CatalogOperation) -> Self {
        Self {
            status: None,
            message: message.into(),
            operation,
        }
    }

    pub fn with_status(
        message: impl Into<String>,
        operation: CatalogOperation,
        status: reqwest::StatusCode,
    ) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            operation,
        }
    }

    /// Classify a reqwest transport error. Timeouts get their own message so
    /// the user can tell a slow service from an unreachable one.
    pub fn from_transport(
        error: &reqwest::Error,
        operation: CatalogOperation,
        timeout: Duration,
    ) -> Self {
        if error.is_timeout() {
            return Self::new(
                format!("request timed out after {}s", timeout.as_secs()),
                operation,
            );
        }

        if let Some(status) = error.status() {
            return Self::with_status(error.to_string(), operation, status);
        }

        if error.is_decode() {
            return Self::new(format!("unexpected response body: {error}"), operation);
        }

        Self::new(format!("network error: {error}"), operation)
    }

    /// Build the error for a response with a non-success status.
    pub fn from_status(status: reqwest::StatusCode, operation: CatalogOperation) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown");
        Self::with_status(
            format!("HTTP {} {}", status.as_u16(), reason),
            operation,
            status,
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status
            .is_some_and(|s| s == reqwest::StatusCode::UNAUTHORIZED)
    }

    pub fn to_fetchdog_error(&self) -> FetchDogError {
        match self.operation {
            CatalogOperation::Login | CatalogOperation::Logout => {
                FetchDogError::Auth(format!("{} failed: {}", self.operation, self.message))
            }
            operation => {
                let message = if self.is_unauthorized() {
                    format!("{} (session expired or not logged in)", self.message)
                } else {
                    self.message.clone()
                };
                FetchDogError::fetch(operation, message)
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for FetchDogError {
    fn from(error: ApiError) -> Self {
        error.to_fetchdog_error()
    }
}
