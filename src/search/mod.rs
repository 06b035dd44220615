//! Dog search: filter state, result model, and fetch orchestration.

pub mod filter;
pub mod model;
pub mod orchestrator;

pub use filter::{FilterEvent, FilterState, PAGE_SIZE};
pub use model::{PageResult, SearchApply, SearchModel, SearchSnapshot, SearchTicket};
pub use orchestrator::{SearchOrchestrator, fetch_page};
