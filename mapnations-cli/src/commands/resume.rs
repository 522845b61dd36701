//! Resume command - show where the last session left off

use anyhow::Result;
use colored::Colorize;
use mapnations_core::{OperationResult, Route};

use super::get_context;
use crate::output;

/// The CLI command that opens `route`
fn command_for(route: &Route) -> String {
    match route {
        Route::Landing => "mn whoami".to_string(),
        Route::Login => "mn login <EMAIL>".to_string(),
        Route::Signup => "mn signup <EMAIL> <USERNAME>".to_string(),
        Route::ResetPassword => "mn reset-password <USERNAME>".to_string(),
        Route::Home => "mn countries".to_string(),
        Route::Country(code) => format!("mn country {}", code),
        Route::Favorites => "mn favorites list".to_string(),
    }
}

fn payload(last: Option<&Route>, target: &Route) -> serde_json::Value {
    serde_json::json!({
        "lastRoute": last.map(Route::path),
        "target": target.path(),
        "command": command_for(target),
    })
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let last = ctx.navigation_service.last_route()?;
    let target = ctx.navigation_service.resume_target()?;

    if json {
        return output::json(&OperationResult::ok(payload(last.as_ref(), &target)));
    }

    match &last {
        Some(route) => println!("{} {}", "Last visited:".bold(), route),
        None => println!("{} {}", "Last visited:".bold(), "nothing yet".dimmed()),
    }
    println!("{} {}", "Continue with:".bold(), command_for(&target).cyan());
    Ok(())
}
