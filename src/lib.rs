pub mod browse;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod favorites;
pub mod matching;
pub mod search;
pub mod session;

pub use catalog::{
    CatalogApi, CatalogClient, CatalogOperation, Credentials, DogRecord, SearchPage, SearchQuery,
    SortOrder,
};
pub use config::Config;
pub use error::{FetchDogError, Result};
pub use favorites::FavoritesSet;
pub use search::{FilterEvent, FilterState, SearchOrchestrator};
pub use session::{SessionGate, SessionState};
