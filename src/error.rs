use thiserror::Error;

use crate::catalog::CatalogOperation;

#[derive(Error, Debug)]
pub enum FetchDogError {
    #[error("authentication error: {0}")]
    Auth(String),

    #[error("{operation} failed: {message}")]
    Fetch {
        operation: CatalogOperation,
        message: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchDogError {
    /// Build a fetch error for the given catalog operation.
    pub fn fetch(operation: CatalogOperation, message: impl Into<String>) -> Self {
        FetchDogError::Fetch {
            operation,
            message: message.into(),
        }
    }

    /// Whether this error came from a catalog or auth call, as opposed to
    /// local validation or configuration.
    pub fn is_remote(&self) -> bool {
        matches!(self, FetchDogError::Auth(_) | FetchDogError::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, FetchDogError>;
