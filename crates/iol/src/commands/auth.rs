//! Auth command - session management.

use std::io::Write;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::{Style, style};
use iol_auth::{Authenticator, TokenData};
use serde::Serialize;

use super::Context;
use crate::output::print_json;

/// Arguments for the auth command.
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Log in with username and password
    Login {
        /// Account username (default: from config, then prompt)
        #[arg(short, long, env = "IOL_USERNAME")]
        username: Option<String>,

        /// Account password (default: prompt)
        #[arg(long, env = "IOL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Exchange the stored refresh token for a new access token
    Refresh,

    /// Show authentication status
    Status,

    /// Remove the stored session
    Logout,
}

/// Session status for JSON output.
#[derive(Debug, Serialize)]
struct StatusOutput {
    authenticated: bool,
    valid: bool,
    expires_at: Option<String>,
    session_file: String,
}

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Login { username, password } => cmd_login(username, password, ctx).await,
        AuthCommand::Refresh => cmd_refresh(ctx).await,
        AuthCommand::Status => cmd_status(ctx),
        AuthCommand::Logout => cmd_logout(ctx),
    }
}

async fn cmd_login(
    username: Option<String>,
    password: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let username = match username.or_else(|| ctx.config.auth.username.clone()) {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    if username.is_empty() {
        bail!("No username provided, aborting.");
    }

    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };

    let mut auth = ctx.authenticator()?;
    let token = auth.login(&username, &password).await?;
    ctx.sessions.save(&token)?;

    if ctx.json_output {
        print_json(&status_output(Some(&token), ctx))?;
    } else {
        let green = Style::new().green();
        println!("{}", green.apply_to("Login successful."));
        println!("Token expires in: {}", token.expires_in_display());
    }

    Ok(())
}

async fn cmd_refresh(ctx: &Context) -> Result<()> {
    let Some(token) = ctx.sessions.load()? else {
        bail!("Not logged in. Run 'iol auth login' first.");
    };

    let token = ctx.refresh(&token).await?;

    if ctx.json_output {
        print_json(&status_output(Some(&token), ctx))?;
    } else {
        println!("Token refreshed.");
        println!("Token expires in: {}", token.expires_in_display());
    }

    Ok(())
}

fn cmd_status(ctx: &Context) -> Result<()> {
    let token = ctx.sessions.load()?;

    if ctx.json_output {
        return print_json(&status_output(token.as_ref(), ctx));
    }

    let dim = Style::new().dim();

    println!();
    println!("{}", style("Authentication Status").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();

    match token {
        Some(token) => {
            let state = if Authenticator::is_token_valid(&token) {
                Style::new().green().apply_to("● authenticated")
            } else {
                Style::new().yellow().apply_to("● expired (will refresh on next use)")
            };
            println!("  {} {}", dim.apply_to("Status:"), state);
            println!(
                "  {} {}",
                dim.apply_to("Expires:"),
                token.expires_in_display()
            );
            if let Some(at) = token.expires_at {
                println!("  {} {}", dim.apply_to("Expires at:"), at.to_rfc3339());
            }
        }
        None => {
            println!(
                "  {} {}",
                dim.apply_to("Status:"),
                Style::new().red().apply_to("● not authenticated")
            );
            println!();
            println!("  {}", dim.apply_to("Log in with: iol auth login"));
        }
    }

    if ctx.verbose {
        println!(
            "  {} {}",
            dim.apply_to("Session:"),
            ctx.sessions.path().display()
        );
        println!("  {} {}", dim.apply_to("API:"), ctx.base_url);
    }

    println!();
    Ok(())
}

fn cmd_logout(ctx: &Context) -> Result<()> {
    if ctx.sessions.delete()? {
        println!("Session removed.");
    } else {
        println!("No stored session found.");
    }
    Ok(())
}

fn status_output(token: Option<&TokenData>, ctx: &Context) -> StatusOutput {
    StatusOutput {
        authenticated: token.is_some(),
        valid: Authenticator::is_token_valid(&token),
        expires_at: token.and_then(|t| t.expires_at).map(|at| at.to_rfc3339()),
        session_file: ctx.sessions.path().display().to_string(),
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
