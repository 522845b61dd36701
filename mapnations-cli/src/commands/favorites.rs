//! Favorites commands - list, add, remove, check

use anyhow::Result;
use clap::Subcommand;
use mapnations_core::{Error, LogEvent, MapNationsContext, OperationResult, Route};

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List your favorite countries
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a country by its alpha-3 code
    Add {
        code: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a country by its alpha-3 code or name
    Remove {
        country: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a country is a favorite, by alpha-3 code or name
    Check {
        country: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Favorites are per user; anonymous calls would silently do nothing
fn require_session(ctx: &MapNationsContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        return Err(Error::NotAuthenticated.into());
    }
    Ok(())
}

pub fn run(command: FavoritesCommands) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    match command {
        FavoritesCommands::List { json } => {
            ctx.navigation_service.visit(&Route::Favorites)?;
            let favorites = ctx.favorites_service.list()?;

            if json {
                return output::json(&OperationResult::ok(favorites));
            }
            if favorites.is_empty() {
                output::info("No favorites yet. Add one with 'mn favorites add <CODE>'.");
                return Ok(());
            }

            let codes: Vec<String> = favorites.iter().map(|c| c.cca3.clone()).collect();
            println!("{}", output::country_table(&favorites, &codes));
        }
        FavoritesCommands::Add { code, json } => {
            require_session(&ctx)?;
            let country = ctx.catalog_service.country(&code)?;
            let added = ctx.favorites_service.add(&country)?;
            if added {
                log_event(&logger, LogEvent::new("favorite_added").with_command("favorites add"));
            }

            if json {
                return output::json(&OperationResult::ok(serde_json::json!({
                    "code": country.cca3,
                    "added": added,
                })));
            }
            if added {
                output::success(&format!("Added {} to favorites", country.display_name()));
            } else {
                output::warning(&format!("{} is already a favorite", country.display_name()));
            }
        }
        FavoritesCommands::Remove { country, json } => {
            require_session(&ctx)?;
            let matches = ctx.favorites_service.lookup(&country)?;
            let mut removed = Vec::new();
            for favorite in &matches {
                if ctx.favorites_service.remove(&favorite.cca3)? {
                    removed.push(favorite.cca3.clone());
                }
            }
            if !removed.is_empty() {
                log_event(&logger, LogEvent::new("favorite_removed").with_command("favorites remove"));
            }

            if json {
                return output::json(&OperationResult::ok(serde_json::json!({
                    "codes": removed,
                    "removed": !removed.is_empty(),
                })));
            }
            if removed.is_empty() {
                output::warning(&format!("{} is not a favorite", country.trim()));
            } else {
                for favorite in &matches {
                    output::success(&format!(
                        "Removed {} ({}) from favorites",
                        favorite.display_name(),
                        favorite.cca3
                    ));
                }
            }
        }
        FavoritesCommands::Check { country, json } => {
            require_session(&ctx)?;
            let matches = ctx.favorites_service.lookup(&country)?;

            if json {
                return output::json(&OperationResult::ok(!matches.is_empty()));
            }
            if matches.is_empty() {
                println!("{} is not a favorite", country.trim());
            }
            for favorite in &matches {
                println!("{} ({}) is a favorite", favorite.display_name(), favorite.cca3);
            }
        }
    }

    Ok(())
}
