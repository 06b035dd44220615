//! Filter, sort and page selection for the dog search.

use crate::catalog::{SearchQuery, SortOrder};

/// Number of dogs per page
pub const PAGE_SIZE: u32 = 25;

/// What the user is currently looking at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected breed; `None` means every breed
    pub breed: Option<String>,
    pub sort: SortOrder,
    /// Zero-based page index
    pub page: u32,
}

/// A user-initiated change to the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// Select a breed; `None` or an empty name clears the filter
    SelectBreed(Option<String>),
    SetSort(SortOrder),
    NextPage,
    PreviousPage,
    /// Back to the initial state
    Reset,
}

impl FilterState {
    pub fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    /// Offset of the first result on the current page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(PAGE_SIZE)
    }

    /// One-based page number shown to the user
    pub fn page_number(&self) -> u64 {
        u64::from(self.page) + 1
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 0
    }

    /// Apply an event. Returns `true` when the state changed and results must
    /// be fetched again.
    pub fn apply(&mut self, event: FilterEvent) -> bool {
        let before = self.clone();
        match event {
            FilterEvent::SelectBreed(breed) => {
                self.breed = breed
                    .map(|b| b.trim().to_string())
                    .filter(|b| !b.is_empty());
            }
            FilterEvent::SetSort(sort) => self.sort = sort,
            FilterEvent::NextPage => self.page = self.page.saturating_add(1),
            FilterEvent::PreviousPage => self.page = self.page.saturating_sub(1),
            FilterEvent::Reset => *self = FilterState::default(),
        }
        *self != before
    }

    /// The search request for this state
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            breeds: self.breed.iter().cloned().collect(),
            sort: self.sort,
            size: PAGE_SIZE,
            from: self.offset(),
        }
    }
}
