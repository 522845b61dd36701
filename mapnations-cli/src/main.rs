//! MapNations CLI - browse countries and keep your favorites

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mapnations_core::{Error, LogEvent};

mod commands;
mod output;

use commands::{auth, countries, demo, favorites, logs, resume};

/// MapNations - countries of the world in your terminal
#[derive(Parser)]
#[command(name = "mn", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a local account
    Signup {
        email: String,
        username: String,
        /// Password (or set MAPNATIONS_PASSWORD, or be prompted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in with email and password
    Login {
        email: String,
        /// Password (or set MAPNATIONS_PASSWORD, or be prompted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a new password for an account
    ResetPassword {
        username: String,
        /// New password (or set MAPNATIONS_PASSWORD, or be prompted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show who is signed in
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse countries
    Countries {
        /// Search by name (overrides region and language)
        #[arg(short, long)]
        search: Option<String>,
        /// Region: All, Africa, Americas, Asia, Europe, Oceania
        #[arg(short, long, conflicts_with = "language")]
        region: Option<String>,
        /// Language name or code
        #[arg(short, long)]
        language: Option<String>,
        /// List the languages available for filtering
        #[arg(long)]
        languages: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one country by its alpha-3 code
    Country {
        code: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorite countries
    Favorites {
        #[command(subcommand)]
        command: favorites::FavoritesCommands,
    },

    /// Show where the last session left off
    Resume {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

impl Commands {
    /// Name used in event logs
    fn name(&self) -> &'static str {
        match self {
            Commands::Signup { .. } => "signup",
            Commands::Login { .. } => "login",
            Commands::Logout { .. } => "logout",
            Commands::ResetPassword { .. } => "reset-password",
            Commands::Whoami { .. } => "whoami",
            Commands::Countries { .. } => "countries",
            Commands::Country { .. } => "country",
            Commands::Favorites { .. } => "favorites",
            Commands::Resume { .. } => "resume",
            Commands::Logs { .. } => "logs",
            Commands::Demo { .. } => "demo",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.name();

    let logger = commands::get_logger();
    commands::log_event(&logger, LogEvent::new("command_executed").with_command(command));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<Error>()
                .map(Error::code)
                .unwrap_or("unexpected");
            commands::log_event(
                &logger,
                LogEvent::new(format!("{}_failed", command.replace('-', "_")))
                    .with_command(command)
                    .with_error(redact(&e))
                    .with_error_details(code),
            );
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Error text for the event log: never storage keys (they embed usernames)
/// or the inner error chain
fn redact(e: &anyhow::Error) -> String {
    match e.downcast_ref::<Error>() {
        Some(Error::Storage(_)) => "Storage error".to_string(),
        Some(core) => core.to_string(),
        None => e.to_string(),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Signup { email, username, password, json } => {
            auth::signup(&email, &username, password, json)
        }
        Commands::Login { email, password, json } => auth::login(&email, password, json),
        Commands::Logout { json } => auth::logout(json),
        Commands::ResetPassword { username, password, json } => {
            auth::reset_password(&username, password, json)
        }
        Commands::Whoami { json } => auth::whoami(json),
        Commands::Countries { search, region, language, languages, json } => {
            countries::list(search, region, language, languages, json)
        }
        Commands::Country { code, json } => countries::show(&code, json),
        Commands::Favorites { command } => favorites::run(command),
        Commands::Resume { json } => resume::run(json),
        Commands::Logs { command } => logs::run(command),
        Commands::Demo { command } => demo::run(command),
    }
}
