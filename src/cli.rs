use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::catalog::SortOrder;
use crate::commands::SessionOptions;

#[derive(Parser)]
#[command(name = "fetchdog")]
#[command(about = "Search adoptable dogs and find a match")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub login: LoginArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Login identity, overriding the environment and config file
#[derive(Args, Debug, Default)]
pub struct LoginArgs {
    /// Name to log in with
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Email to log in with
    #[arg(long, global = true)]
    pub email: Option<String>,
}

impl LoginArgs {
    fn session_options(&self) -> SessionOptions<'_> {
        SessionOptions {
            name: self.name.as_deref(),
            email: self.email.as_deref(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse dogs interactively
    #[command(visible_alias = "b")]
    Browse,

    /// List every breed
    Breeds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one page of dogs
    #[command(visible_alias = "s")]
    Search {
        /// Only show this breed
        #[arg(short, long)]
        breed: Option<String>,

        /// Sort by breed
        #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
        sort: SortOrder,

        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pick a match from a set of dog ids
    Match {
        /// Dog IDs to choose from
        ids: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a configuration value
    Get {
        /// Key: base_url, timeout_secs, user.name, user.email
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a configuration value
    Set {
        /// Key: base_url, timeout_secs, user.name, user.email
        key: String,

        /// New value
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            cmd_breeds, cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show, cmd_match,
            cmd_search,
        };

        let options = self.login.session_options();

        match self.command {
            Commands::Browse => cmd_browse(options).await,

            Commands::Breeds { json } => cmd_breeds(options, json).await,

            Commands::Search {
                breed,
                sort,
                page,
                json,
            } => cmd_search(options, breed, sort, page, json).await,

            Commands::Match { ids, json } => cmd_match(options, ids, json).await,

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "fetchdog", &mut io::stdout());
}
