//! Search state with reducer-style transitions.
//!
//! This module holds no I/O. The orchestrator drives it through
//! `begin_*`/`finish_*` pairs; each search carries the generation it was
//! issued for and its result is applied only if no newer search has started
//! since. Breed list loads follow the same rule with their own counter.

use crate::catalog::{DogRecord, SearchQuery};
use crate::error::Result;

use super::filter::{FilterEvent, FilterState};

/// Records for one page plus the service's match count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub dogs: Vec<DogRecord>,
    pub total: Option<u64>,
}

impl PageResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Handed out by [`SearchModel::begin_search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: SearchQuery,
}

/// Whether a finished search changed the visible results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchApply {
    Applied,
    /// A newer search was issued; the result was dropped
    Stale,
}

/// Read-only copy of the search state for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSnapshot {
    pub filter: FilterState,
    pub dogs: Vec<DogRecord>,
    pub total: Option<u64>,
    pub breeds: Vec<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SearchModel {
    filter: FilterState,
    dogs: Vec<DogRecord>,
    total: Option<u64>,
    breeds: Vec<String>,
    latest_generation: u64,
    /// Generation of the search still outstanding, if any
    pending_generation: Option<u64>,
    breeds_generation: u64,
    /// Generation of the breed load still outstanding, if any
    pending_breeds: Option<u64>,
}

impl SearchModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn dogs(&self) -> &[DogRecord] {
        &self.dogs
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// True while the breed list or the current search is outstanding
    pub fn is_loading(&self) -> bool {
        self.pending_breeds.is_some() || self.pending_generation.is_some()
    }

    /// Apply a filter change. Returns whether a new search is needed.
    pub fn update_filter(&mut self, event: FilterEvent) -> bool {
        self.filter.apply(event)
    }

    /// Start a search for the current filter.
    ///
    /// Invalidates the visible results and supersedes any search still in
    /// flight.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.latest_generation += 1;
        self.pending_generation = Some(self.latest_generation);
        self.dogs.clear();
        self.total = None;

        SearchTicket {
            generation: self.latest_generation,
            query: self.filter.to_query(),
        }
    }

    /// Record the outcome of a search. Failures leave an empty result list.
    pub fn finish_search(&mut self, generation: u64, outcome: Result<PageResult>) -> SearchApply {
        if generation != self.latest_generation {
            return SearchApply::Stale;
        }

        let page = outcome.unwrap_or_default();
        self.dogs = page.dogs;
        self.total = page.total;
        self.pending_generation = None;
        SearchApply::Applied
    }

    /// Clear the loading flag for a search that ended without a result
    /// (for example because its task was dropped).
    pub fn abandon_search(&mut self, generation: u64) {
        if self.pending_generation == Some(generation) {
            self.pending_generation = None;
        }
    }

    /// Start a breed list load, superseding any load still in flight.
    /// Returns the load's generation.
    pub fn begin_breeds(&mut self) -> u64 {
        self.breeds_generation += 1;
        self.pending_breeds = Some(self.breeds_generation);
        self.breeds_generation
    }

    /// Record the breed list. Failures fall back to an empty list.
    pub fn finish_breeds(
        &mut self,
        generation: u64,
        outcome: Result<Vec<String>>,
    ) -> SearchApply {
        if generation != self.breeds_generation {
            return SearchApply::Stale;
        }

        self.breeds = outcome.unwrap_or_default();
        self.pending_breeds = None;
        SearchApply::Applied
    }

    /// Clear the loading flag for a breed load that ended without a result
    pub fn abandon_breeds(&mut self, generation: u64) {
        if self.pending_breeds == Some(generation) {
            self.pending_breeds = None;
        }
    }

    /// Return to the initial state, discarding anything still in flight.
    pub fn reset(&mut self) {
        let next_generation = self.latest_generation + 1;
        let next_breeds_generation = self.breeds_generation + 1;
        *self = SearchModel::default();
        self.latest_generation = next_generation;
        self.breeds_generation = next_breeds_generation;
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            filter: self.filter.clone(),
            dogs: self.dogs.clone(),
            total: self.total,
            breeds: self.breeds.clone(),
            loading: self.is_loading(),
        }
    }
}
