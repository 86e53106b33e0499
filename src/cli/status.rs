//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionState;

/// Run the status command to display configuration and session status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "taskctl Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not created yet)".dimmed()
        );
    }

    let ctx = CommandContext::new(opts)?;
    println!("API: {}", ctx.session.base_url().cyan());
    println!();

    match ctx.session.current_session() {
        SessionState::LoggedIn { subject_id, email } => {
            let who = if email.is_empty() { subject_id } else { email };
            println!("{} Logged in as {}", "✓".green(), who.bold());

            if let Some(claims) = ctx.session.claims() {
                let remaining = claims.expires_at - Utc::now().timestamp();
                println!(
                    "{} Access token valid (expires in {}h {}m)",
                    "✓".green(),
                    remaining / 3600,
                    (remaining % 3600) / 60
                );
            }
        }
        SessionState::LoggedOut => {
            if ctx.session.access_token().is_some() {
                // Stored but expired or undecodable; the next authenticated
                // command will refresh or fail over to login
                println!(
                    "{} Access token expired (will refresh on next command)",
                    "⚠".yellow()
                );
            } else {
                println!("{} Not logged in", "✗".red());
                println!("  → Run 'taskctl login' to start a session");
            }
        }
    }

    if ctx.session.has_refresh_token() {
        println!("{} Refresh token stored", "✓".green());
    } else {
        println!("{} No refresh token stored", "○".dimmed());
    }

    if let Some(ref conversation) = ctx.config.conversation_id {
        println!("{} Active chat thread: {}", "○".dimmed(), conversation);
    }

    println!();
    Ok(())
}
