//! Text rendering for the login form, filters, results and pagination.
//!
//! Label helpers return plain text; the `render_*` functions compose them and
//! add color when stdout supports it.

use owo_colors::{OwoColorize, Stream};

use crate::favorites::FavoritesSet;
use crate::search::{FilterState, SearchSnapshot};

pub mod grid;

pub use grid::format_dog_table;

pub const NAME_PROMPT: &str = "Name: ";
pub const EMAIL_PROMPT: &str = "Email: ";
pub const ANY_BREED_LABEL: &str = "(any breed)";
pub const LOADING_LABEL: &str = "Loading...";
pub const EMPTY_RESULTS_LABEL: &str = "No dogs found.";
pub const LOGOUT_SUCCESS_MESSAGE: &str = "Logged out successfully!";
pub const LOGOUT_FAILED_MESSAGE: &str = "Failed to log out. Please try again.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Check your name and email and try again.";

/// Button text for a dog card
pub fn favorite_label(is_favorite: bool) -> &'static str {
    if is_favorite {
        "Remove from Favorites"
    } else {
        "Add to Favorites"
    }
}

/// "Page N", one-based
pub fn page_label(filter: &FilterState) -> String {
    format!("Page {}", filter.page_number())
}

/// Breed selector entries: the implicit no-filter entry, then every breed.
/// The selected entry is prefixed with `*`.
pub fn breed_options(breeds: &[String], selected: Option<&str>) -> Vec<String> {
    let mark = |is_selected: bool| if is_selected { "* " } else { "  " };

    std::iter::once(format!("{}{}", mark(selected.is_none()), ANY_BREED_LABEL))
        .chain(
            breeds
                .iter()
                .map(|breed| format!("{}{}", mark(selected == Some(breed.as_str())), breed)),
        )
        .collect()
}

/// One-line summary of the active filter
pub fn filter_summary(filter: &FilterState) -> String {
    let breed = filter.breed.as_deref().unwrap_or(ANY_BREED_LABEL);
    format!("Breed: {breed} | Sort: breed {}", filter.sort)
}

pub fn render_breed_selector(breeds: &[String], selected: Option<&str>) -> String {
    let mut out = format!(
        "{}\n",
        "Breeds".if_supports_color(Stream::Stdout, |t| t.bold())
    );
    for line in breed_options(breeds, selected) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Previous / page label / Next, with Previous dimmed on the first page
pub fn render_pagination(filter: &FilterState) -> String {
    let previous = if filter.has_previous_page() {
        "[Previous]".to_string()
    } else {
        "[Previous]"
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    };
    format!("{previous}  {}  [Next]", page_label(filter))
}

/// Result area: loading line, empty state, or the grid
pub fn render_results(snapshot: &SearchSnapshot, favorites: &FavoritesSet) -> String {
    if snapshot.loading {
        return LOADING_LABEL
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string();
    }

    if snapshot.dogs.is_empty() {
        return EMPTY_RESULTS_LABEL
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string();
    }

    let mut out = format_dog_table(&snapshot.dogs, favorites);
    if let Some(total) = snapshot.total {
        out.push_str(&format!("\n{total} matching dogs"));
    }
    out
}

/// Whole search view
pub fn render_search_view(snapshot: &SearchSnapshot, favorites: &FavoritesSet) -> String {
    let header = filter_summary(&snapshot.filter);
    format!(
        "{}\n\n{}\n\n{}\n{} favorite(s) selected. Type 'match' to generate a match.",
        header.if_supports_color(Stream::Stdout, |t| t.cyan()),
        render_results(snapshot, favorites),
        render_pagination(&snapshot.filter),
        favorites.len(),
    )
}
