//! Drives the two-step dog search against the catalog.
//!
//! A search first asks `/dogs/search` for the ids on the requested page, then
//! fetches the full records for those ids. Several searches may overlap when
//! the user changes the filter quickly; only the most recently issued one is
//! allowed to update the model.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::catalog::{CatalogApi, SearchQuery};
use crate::error::Result;

use super::filter::FilterEvent;
use super::model::{PageResult, SearchApply, SearchModel, SearchSnapshot};

/// Run search then record fetch for one query.
///
/// A response without a proper id list yields an empty page without touching
/// `/dogs`.
pub async fn fetch_page<C: CatalogApi>(catalog: &C, query: &SearchQuery) -> Result<PageResult> {
    let page = catalog.search_ids(query).await?;

    let Some(ids) = page.result_ids else {
        warn!("dog search returned no result id list, showing no results");
        return Ok(PageResult::empty());
    };

    let dogs = catalog.fetch_records(&ids).await?;
    Ok(PageResult {
        dogs,
        total: page.total,
    })
}

/// Clears the loading flag if a search ends without reporting back.
struct PendingSearch {
    model: Arc<Mutex<SearchModel>>,
    generation: u64,
    done: bool,
}

impl PendingSearch {
    fn complete(mut self, outcome: Result<PageResult>) -> SearchApply {
        self.done = true;
        self.model.lock().finish_search(self.generation, outcome)
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        if !self.done {
            self.model.lock().abandon_search(self.generation);
        }
    }
}

/// Same as [`PendingSearch`], for a breed list load.
struct PendingBreeds {
    model: Arc<Mutex<SearchModel>>,
    generation: u64,
    done: bool,
}

impl PendingBreeds {
    fn complete(mut self, outcome: Result<Vec<String>>) -> Option<usize> {
        self.done = true;
        let mut model = self.model.lock();
        match model.finish_breeds(self.generation, outcome) {
            SearchApply::Applied => Some(model.breeds().len()),
            SearchApply::Stale => None,
        }
    }
}

impl Drop for PendingBreeds {
    fn drop(&mut self) {
        if !self.done {
            self.model.lock().abandon_breeds(self.generation);
        }
    }
}

/// Owns the search model and performs fetches for it
pub struct SearchOrchestrator<C> {
    catalog: Arc<C>,
    model: Arc<Mutex<SearchModel>>,
}

impl<C> Clone for SearchOrchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            model: Arc::clone(&self.model),
        }
    }
}

impl<C: CatalogApi> SearchOrchestrator<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            model: Arc::new(Mutex::new(SearchModel::new())),
        }
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    /// Apply a filter change. Returns whether a refresh is needed.
    pub fn update_filter(&self, event: FilterEvent) -> bool {
        self.model.lock().update_filter(event)
    }

    /// Fetch the page for the current filter and apply it unless a newer
    /// search has been issued meanwhile.
    pub async fn refresh(&self) -> SearchApply {
        let ticket = self.model.lock().begin_search();
        let pending = PendingSearch {
            model: Arc::clone(&self.model),
            generation: ticket.generation,
            done: false,
        };
        debug!(generation = ticket.generation, query = ?ticket.query, "search started");

        let outcome = fetch_page(self.catalog.as_ref(), &ticket.query).await;
        if let Err(e) = &outcome {
            warn!(generation = ticket.generation, "Error fetching dogs: {e}");
        }

        let applied = pending.complete(outcome);
        if applied == SearchApply::Stale {
            debug!(
                generation = ticket.generation,
                "search superseded, discarding result"
            );
        }
        applied
    }

    /// Load the breed list. Returns the number of breeds now available, or
    /// `None` when a newer load or a reset superseded this one.
    pub async fn load_breeds(&self) -> Option<usize> {
        let generation = self.model.lock().begin_breeds();
        let pending = PendingBreeds {
            model: Arc::clone(&self.model),
            generation,
            done: false,
        };

        let outcome = self.catalog.list_breeds().await;
        if let Err(e) = &outcome {
            warn!("Error fetching breeds: {e}");
        }

        let count = pending.complete(outcome);
        if count.is_none() {
            debug!(generation, "breed load superseded, discarding result");
        }
        count
    }

    /// Drop all search state, e.g. on logout
    pub fn reset(&self) {
        self.model.lock().reset();
    }

    pub fn is_loading(&self) -> bool {
        self.model.lock().is_loading()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.model.lock().snapshot()
    }
}
