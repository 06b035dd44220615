//! Match trigger: asks the catalog to pick one dog from the favorites.

use tracing::warn;

use crate::catalog::CatalogApi;
use crate::error::{FetchDogError, Result};
use crate::favorites::FavoritesSet;

pub const EMPTY_FAVORITES_MESSAGE: &str =
    "Please select at least one favorite dog before matching.";
pub const MATCH_FAILED_MESSAGE: &str = "Failed to generate match. Please try again.";

/// Message shown for a successful match
pub fn match_message(dog_id: &str) -> String {
    format!("Matched with dog ID: {dog_id}")
}

/// Reject an empty favorites set before any network call
pub fn validate_favorites(favorites: &FavoritesSet) -> Result<Vec<String>> {
    if favorites.is_empty() {
        return Err(FetchDogError::Validation(EMPTY_FAVORITES_MESSAGE.to_string()));
    }
    Ok(favorites.ids())
}

/// Request a match for the current favorites and return the matched id
pub async fn request_match<C: CatalogApi>(
    catalog: &C,
    favorites: &FavoritesSet,
) -> Result<String> {
    let ids = validate_favorites(favorites)?;
    catalog.request_match(&ids).await.inspect_err(|e| {
        warn!("Error generating match: {e}");
    })
}

/// Text to show the user for a match attempt
pub fn describe_match_outcome(outcome: &Result<String>) -> String {
    match outcome {
        Ok(id) => match_message(id),
        Err(FetchDogError::Validation(msg)) => msg.clone(),
        Err(_) => MATCH_FAILED_MESSAGE.to_string(),
    }
}
