//! Whoami command implementation

use colored::Colorize;

use crate::cli::args::{GlobalOptions, OutputFormat};
use crate::cli::context::CommandContext;
use crate::client::AuthApi;
use crate::error::Result;
use crate::output::formatters::UserRow;
use crate::output::{json, table};

/// Run the whoami command: fetch the profile through the authenticated
/// executor
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_subject()?;

    let user = ctx.client.me().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&user)?),
        OutputFormat::Table => {
            let rows = vec![UserRow::from(&user)];
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Pretty => {
            println!("{}", user.email.bold());
            println!("  ID: {}", user.id);
            if let Some(ref role) = user.role {
                println!("  Role: {}", role);
            }
            println!(
                "  Active: {}   Verified: {}",
                if user.is_active { "yes" } else { "no" },
                if user.is_verified { "yes" } else { "no" }
            );
            if let Some(ref created) = user.created_at {
                println!("  Member since: {}", created);
            }
        }
    }

    Ok(())
}
