mod browse;
mod catalog;
mod config;

pub use browse::cmd_browse;
pub use catalog::{SessionOptions, cmd_breeds, cmd_match, cmd_search};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};

use serde::Serialize;

use crate::catalog::{CatalogApi, Credentials};
use crate::error::Result;
use crate::session::SessionGate;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run `body` inside a logged-in session.
///
/// The session is always closed afterwards. A failed logout is only logged,
/// so it never hides the result of `body`.
pub(crate) async fn with_session<C, T, F, Fut>(
    catalog: &C,
    credentials: &Credentials,
    body: F,
) -> Result<T>
where
    C: CatalogApi,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut session = SessionGate::new();
    session.login(catalog, credentials).await?;

    let result = body().await;

    if let Err(e) = session.logout(catalog).await {
        tracing::warn!("Error logging out: {e}");
    }
    result
}
