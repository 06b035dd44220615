//! Interactive browse session.
//!
//! The session gate decides what an input line means: while logged out, lines
//! fill in the login form; once logged in, they are browse commands. Searches
//! and the breed list load run as background tasks and report back over a
//! channel, so the prompt stays responsive and overlapping searches can occur.
//! Only searches that were still current when they finished cause a redraw.

pub mod command;

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use crate::catalog::{CatalogApi, Credentials};
use crate::display::{
    self, EMAIL_PROMPT, LOGIN_FAILED_MESSAGE, LOGOUT_FAILED_MESSAGE, LOGOUT_SUCCESS_MESSAGE,
    NAME_PROMPT,
};
use crate::error::Result;
use crate::favorites::FavoritesSet;
use crate::matching::{describe_match_outcome, request_match};
use crate::search::{FilterEvent, SearchApply, SearchOrchestrator};
use crate::session::SessionGate;

pub use command::{BrowseCommand, HELP_TEXT, parse_command};

const COMMAND_PROMPT: &str = "> ";

/// Completion notices from background tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseEvent {
    SearchFinished(SearchApply),
    BreedsLoaded(usize),
}

/// Whether the input loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Progress through the login form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum LoginForm {
    #[default]
    AwaitingName,
    AwaitingEmail {
        name: String,
    },
}

/// State and behavior of one interactive session
pub struct Browser<C, W> {
    session: SessionGate,
    search: SearchOrchestrator<C>,
    favorites: FavoritesSet,
    login_form: LoginForm,
    events: mpsc::UnboundedSender<BrowseEvent>,
    out: W,
}

impl<C, W> Browser<C, W>
where
    C: CatalogApi + 'static,
    W: Write,
{
    pub fn new(catalog: Arc<C>, out: W) -> (Self, mpsc::UnboundedReceiver<BrowseEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let browser = Self {
            session: SessionGate::new(),
            search: SearchOrchestrator::new(catalog),
            favorites: FavoritesSet::new(),
            login_form: LoginForm::default(),
            events,
            out,
        };
        (browser, receiver)
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub fn search(&self) -> &SearchOrchestrator<C> {
        &self.search
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Print the prompt matching the current state
    pub fn prompt(&mut self) -> Result<()> {
        let prompt = if self.session.is_authenticated() {
            COMMAND_PROMPT
        } else {
            match self.login_form {
                LoginForm::AwaitingName => NAME_PROMPT,
                LoginForm::AwaitingEmail { .. } => EMAIL_PROMPT,
            }
        };
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Handle one line of user input
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let flow = if self.session.is_authenticated() {
            match parse_command(line) {
                Ok(Some(command)) => self.handle_command(command).await?,
                Ok(None) => Flow::Continue,
                Err(e) => {
                    writeln!(self.out, "{e}")?;
                    Flow::Continue
                }
            }
        } else {
            self.handle_login_line(line).await?;
            Flow::Continue
        };

        if flow == Flow::Continue {
            self.prompt()?;
        }
        Ok(flow)
    }

    async fn handle_login_line(&mut self, line: &str) -> Result<()> {
        let value = line.trim();
        if value.is_empty() {
            return Ok(());
        }

        match std::mem::take(&mut self.login_form) {
            LoginForm::AwaitingName => {
                self.login_form = LoginForm::AwaitingEmail {
                    name: value.to_string(),
                };
            }
            LoginForm::AwaitingEmail { name } => {
                let credentials = Credentials::new(name, value);
                self.login(&credentials).await?;
            }
        }
        Ok(())
    }

    /// Log in and, on success, start loading breeds and the first page.
    /// A rejected login is reported and leaves the session logged out.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<bool> {
        let catalog = Arc::clone(self.search.catalog());
        match self.session.login(catalog.as_ref(), credentials).await {
            Ok(()) => {
                writeln!(self.out, "Welcome, {}!", credentials.name)?;
                self.login_form = LoginForm::default();
                self.spawn_breeds();
                self.spawn_refresh();
                Ok(true)
            }
            Err(e) => {
                warn!("Login failed: {e}");
                writeln!(self.out, "{LOGIN_FAILED_MESSAGE}")?;
                self.login_form = LoginForm::default();
                Ok(false)
            }
        }
    }

    async fn handle_command(&mut self, command: BrowseCommand) -> Result<Flow> {
        match command {
            BrowseCommand::Help => writeln!(self.out, "{HELP_TEXT}")?,
            BrowseCommand::Show => self.render()?,
            BrowseCommand::Breeds => {
                let snapshot = self.search.snapshot();
                write!(
                    self.out,
                    "{}",
                    display::render_breed_selector(
                        &snapshot.breeds,
                        snapshot.filter.breed.as_deref()
                    )
                )?;
            }
            BrowseCommand::SelectBreed(breed) => {
                self.change_filter(FilterEvent::SelectBreed(breed))?
            }
            BrowseCommand::Sort(sort) => self.change_filter(FilterEvent::SetSort(sort))?,
            BrowseCommand::Next => self.change_filter(FilterEvent::NextPage)?,
            BrowseCommand::Previous => {
                if !self.search.snapshot().filter.has_previous_page() {
                    writeln!(self.out, "Already on the first page.")?;
                } else {
                    self.change_filter(FilterEvent::PreviousPage)?;
                }
            }
            BrowseCommand::ToggleFavorite(id) => {
                let now_favorite = self.favorites.toggle(&id);
                if now_favorite {
                    writeln!(self.out, "Added {id} to favorites.")?;
                } else {
                    writeln!(self.out, "Removed {id} from favorites.")?;
                }
            }
            BrowseCommand::Favorites => {
                if self.favorites.is_empty() {
                    writeln!(self.out, "No favorites yet.")?;
                } else {
                    writeln!(self.out, "Favorites: {}", self.favorites.ids().join(", "))?;
                }
            }
            BrowseCommand::Match => {
                let catalog = Arc::clone(self.search.catalog());
                let outcome = request_match(catalog.as_ref(), &self.favorites).await;
                writeln!(self.out, "{}", describe_match_outcome(&outcome))?;
            }
            BrowseCommand::Logout => self.logout().await?,
            BrowseCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// End the session. Success resets favorites and filters and returns to
    /// the login form; failure changes nothing.
    pub async fn logout(&mut self) -> Result<()> {
        let catalog = Arc::clone(self.search.catalog());
        match self.session.logout(catalog.as_ref()).await {
            Ok(()) => {
                self.favorites.clear();
                self.search.reset();
                self.login_form = LoginForm::default();
                writeln!(self.out, "{LOGOUT_SUCCESS_MESSAGE}")?;
            }
            Err(e) => {
                warn!("Error logging out: {e}");
                writeln!(self.out, "{LOGOUT_FAILED_MESSAGE}")?;
            }
        }
        Ok(())
    }

    fn change_filter(&mut self, event: FilterEvent) -> Result<()> {
        if self.search.update_filter(event) {
            self.spawn_refresh();
            writeln!(self.out, "{}", display::LOADING_LABEL)?;
        }
        Ok(())
    }

    fn spawn_refresh(&self) {
        let search = self.search.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let applied = search.refresh().await;
            let _ = events.send(BrowseEvent::SearchFinished(applied));
        });
    }

    fn spawn_breeds(&self) {
        let search = self.search.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            if let Some(count) = search.load_breeds().await {
                let _ = events.send(BrowseEvent::BreedsLoaded(count));
            }
        });
    }

    /// React to a finished background task
    pub fn handle_event(&mut self, event: BrowseEvent) -> Result<()> {
        if !self.session.is_authenticated() {
            return Ok(());
        }

        match event {
            BrowseEvent::SearchFinished(SearchApply::Stale) => return Ok(()),
            BrowseEvent::SearchFinished(SearchApply::Applied) => {}
            BrowseEvent::BreedsLoaded(count) => {
                writeln!(
                    self.out,
                    "\n{count} breeds available. Type 'breeds' to list them."
                )?;
            }
        }

        if !self.search.is_loading() {
            writeln!(self.out)?;
            self.render()?;
        }
        self.prompt()
    }

    /// Render the search view
    pub fn render(&mut self) -> Result<()> {
        let snapshot = self.search.snapshot();
        writeln!(
            self.out,
            "{}",
            display::render_search_view(&snapshot, &self.favorites)
        )?;
        Ok(())
    }
}

/// Run the interactive session on stdin/stdout until quit or end of input
pub async fn run_browse<C>(catalog: Arc<C>, credentials: Option<Credentials>) -> Result<()>
where
    C: CatalogApi + 'static,
{
    let (mut browser, mut events) = Browser::new(catalog, std::io::stdout());

    if let Some(credentials) = credentials {
        browser.login(&credentials).await?;
    }
    browser.prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if browser.handle_line(&line).await? == Flow::Quit {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Some(event) = events.recv() => browser.handle_event(event)?,
        }
    }

    Ok(())
}
