use std::sync::Arc;

use tracing::debug;

use super::SessionOptions;
use crate::browse::run_browse;
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::error::Result;

/// Start the interactive session.
///
/// Logs in straight away when a name and email are known; otherwise the
/// session opens on the login form.
pub async fn cmd_browse(options: SessionOptions<'_>) -> Result<()> {
    let config = Config::load()?;
    let client = CatalogClient::from_config(&config)?;
    debug!(base_url = %client.base_url(), "starting browse session");

    let credentials = config.credentials(options.name, options.email).ok();
    run_browse(Arc::new(client), credentials).await
}
