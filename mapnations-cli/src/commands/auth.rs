//! Account commands - signup, login, logout, reset-password, whoami

use anyhow::Result;
use colored::Colorize;
use mapnations_core::{LogEvent, OperationResult, Route};

use super::{get_context, get_logger, get_new_password, get_password, log_event};
use crate::output;

pub fn signup(email: &str, username: &str, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.navigation_service.visit(&Route::Signup)?;

    let password = get_new_password(password, "Choose a password")?;
    let user = ctx.auth_service.sign_up(email, &password, username)?;
    log_event(&get_logger(), LogEvent::new("signup_completed").with_command("signup"));

    if json {
        return output::json(&OperationResult::ok(user));
    }

    output::success(&format!("Account created for {}", user.username));
    println!("Run 'mn login {}' to sign in.", user.email);
    Ok(())
}

pub fn login(email: &str, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.navigation_service.visit(&Route::Login)?;

    let password = get_password(password, "Password")?;
    let user = ctx.auth_service.sign_in(email, &password)?;
    log_event(&get_logger(), LogEvent::new("login_succeeded").with_command("login"));

    if json {
        return output::json(&OperationResult::ok(user));
    }

    output::success(&format!("Welcome back, {}!", user.username));
    Ok(())
}

pub fn logout(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let previous = ctx.session.username();
    ctx.auth_service.sign_out()?;
    ctx.navigation_service.visit(&Route::Landing)?;

    if json {
        return output::json(&OperationResult::ok(serde_json::json!({ "signedOut": previous })));
    }

    match previous {
        Some(username) => output::success(&format!("Signed out {}", username)),
        None => output::warning("No one is signed in"),
    }
    Ok(())
}

pub fn reset_password(username: &str, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.navigation_service.visit(&Route::ResetPassword)?;

    let password = get_new_password(password, "New password")?;
    ctx.auth_service.reset_password(username, &password)?;
    log_event(&get_logger(), LogEvent::new("password_reset").with_command("reset-password"));

    if json {
        return output::json(&OperationResult::ok(serde_json::json!({ "username": username })));
    }

    output::success("Password updated. You can now log in with the new password.");
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx.auth_service.current_user();
    let credentials = ctx.auth_service.credentials();
    let accounts = credentials.list_usernames()?;
    let legacy = credentials.legacy_count()?;

    if json {
        return output::json(&OperationResult::ok(serde_json::json!({
            "user": user,
            "accounts": accounts,
            "legacyPasswords": legacy,
            "demoMode": ctx.config.demo_mode,
        })));
    }

    match user {
        Some(user) => {
            println!("{} {}", "Username:".bold(), user.username);
            println!("{} {}", "Email:".bold(), user.email);
            if ctx.config.demo_mode {
                println!("{}", "(demo mode)".dimmed());
            }
        }
        None => output::info("Not signed in. Use 'mn login <EMAIL>' or 'mn signup'."),
    }

    println!();
    println!("{} {}", "Local accounts:".bold(), output::join_or_dash(accounts.iter().map(String::as_str)));
    if legacy > 0 {
        output::warning(&format!(
            "{} account(s) still have a clear-text password; it is hashed on their next login",
            legacy
        ));
    }
    Ok(())
}
