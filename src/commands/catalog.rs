//! One-shot catalog commands.
//!
//! Each command logs in, does its work and logs out again:
//! - `breeds`: list every breed
//! - `search`: show one page of dogs
//! - `match`: pick a match from the given dog ids

use owo_colors::OwoColorize;
use serde_json::json;

use super::{print_json, with_session};
use crate::catalog::{CatalogApi, CatalogClient, Credentials, SortOrder};
use crate::config::Config;
use crate::display::{self, EMPTY_RESULTS_LABEL};
use crate::error::Result;
use crate::favorites::FavoritesSet;
use crate::matching::{match_message, request_match, validate_favorites};
use crate::search::{FilterState, fetch_page};

/// Options shared by the one-shot commands
pub struct SessionOptions<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
}

fn connect(options: &SessionOptions<'_>) -> Result<(CatalogClient, Credentials)> {
    let config = Config::load()?;
    let credentials = config.credentials(options.name, options.email)?;
    let client = CatalogClient::from_config(&config)?;
    Ok((client, credentials))
}

/// List every breed the catalog knows
pub async fn cmd_breeds(options: SessionOptions<'_>, json: bool) -> Result<()> {
    let (client, credentials) = connect(&options)?;
    let breeds = list_breeds(&client, &credentials).await?;

    if json {
        return print_json(&json!({ "breeds": breeds }));
    }

    for breed in &breeds {
        println!("{breed}");
    }
    println!("{}", format!("{} breeds", breeds.len()).dimmed());
    Ok(())
}

async fn list_breeds<C: CatalogApi>(
    catalog: &C,
    credentials: &Credentials,
) -> Result<Vec<String>> {
    with_session(catalog, credentials, || catalog.list_breeds()).await
}

/// Show one page of search results
pub async fn cmd_search(
    options: SessionOptions<'_>,
    breed: Option<String>,
    sort: SortOrder,
    page: u32,
    json: bool,
) -> Result<()> {
    let filter = FilterState {
        breed: breed.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
        sort,
        page,
    };

    let (client, credentials) = connect(&options)?;
    let query = filter.to_query();
    let result = with_session(&client, &credentials, || fetch_page(&client, &query)).await?;

    if json {
        return print_json(&json!({
            "breed": filter.breed,
            "sort": filter.sort,
            "page": filter.page_number(),
            "total": result.total,
            "dogs": result.dogs,
        }));
    }

    println!("{}", display::filter_summary(&filter).cyan());
    if result.dogs.is_empty() {
        println!("{}", EMPTY_RESULTS_LABEL.dimmed());
    } else {
        println!("{}", display::format_dog_table(&result.dogs, &FavoritesSet::new()));
    }

    let mut footer = display::page_label(&filter);
    if let Some(total) = result.total {
        footer.push_str(&format!(" ({total} matching dogs)"));
    }
    println!("{}", footer.dimmed());
    Ok(())
}

/// Request a match from the given dog ids
pub async fn cmd_match(options: SessionOptions<'_>, ids: Vec<String>, json: bool) -> Result<()> {
    let mut favorites = FavoritesSet::new();
    for id in &ids {
        if !favorites.contains(id) {
            favorites.toggle(id);
        }
    }
    // Fail before any network traffic when there is nothing to match.
    validate_favorites(&favorites)?;

    let (client, credentials) = connect(&options)?;
    let matched = with_session(&client, &credentials, || {
        request_match(&client, &favorites)
    })
    .await?;

    if json {
        return print_json(&json!({ "match": matched }));
    }

    println!("{}", match_message(&matched).green());
    Ok(())
}
