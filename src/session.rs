//! Session gate: decides whether the login form or the search view is shown.

use tracing::info;

use crate::catalog::{CatalogApi, Credentials};
use crate::error::Result;

/// Authentication state of the current user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated {
        name: String,
    },
}

/// Tracks the session and performs the transitions between its states.
///
/// The only way in is a successful login and the only way out is a successful
/// logout; failed calls leave the state untouched.
#[derive(Debug, Default)]
pub struct SessionGate {
    state: SessionState,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Name of the logged-in user
    pub fn user_name(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { name } => Some(name),
            SessionState::Unauthenticated => None,
        }
    }

    pub async fn login<C: CatalogApi>(
        &mut self,
        catalog: &C,
        credentials: &Credentials,
    ) -> Result<()> {
        catalog.login(credentials).await?;
        info!(name = %credentials.name, "logged in");
        self.state = SessionState::Authenticated {
            name: credentials.name.clone(),
        };
        Ok(())
    }

    /// End the remote session. Callers reset their own per-session state
    /// only when this returns `Ok`.
    pub async fn logout<C: CatalogApi>(&mut self, catalog: &C) -> Result<()> {
        catalog.logout().await?;
        info!("logged out");
        self.state = SessionState::Unauthenticated;
        Ok(())
    }
}
