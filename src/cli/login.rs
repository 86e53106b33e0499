//! Login command implementation

use chrono::Utc;
use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::error::Result;

/// Run the login command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    println!("{}", "Log in to Tasklight".bold());

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    println!("\n{}", "Authenticating...".cyan());
    let response = ctx.session.login(&email, &password).await?;

    println!(
        "{} Logged in as {}",
        "✓".green(),
        response.user.email.bold()
    );

    if let Some(claims) = ctx.session.claims() {
        let remaining = claims.expires_at - Utc::now().timestamp();
        if remaining > 0 {
            println!(
                "  Session valid for {}h {}m",
                remaining / 3600,
                (remaining % 3600) / 60
            );
        }
    }

    // Make an explicit --api-url sticky so follow-up commands hit the same
    // backend without re-passing the flag
    if opts.api_url.is_some() && ctx.config.api_url != opts.api_url {
        ctx.config.api_url = opts.api_url.clone();
        ctx.save_config()?;
    }

    println!("\n{}", "Try running:".bold());
    println!("  {} - List your tasks", "taskctl task list".cyan());
    println!("  {} - Show session status", "taskctl status".cyan());

    Ok(())
}
