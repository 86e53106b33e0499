//! Register command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::error::Result;

/// Run the register command.
///
/// Creating an account does not start a session; users log in afterwards.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    println!("{}", "Create a Tasklight account".bold());

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    println!("\n{}", "Creating account...".cyan());
    let user = ctx.session.register(&email, &password).await?;

    println!("{} Account created for {}", "✓".green(), user.email.bold());
    println!(
        "\nRun {} to start a session.",
        "taskctl login".cyan()
    );

    Ok(())
}
