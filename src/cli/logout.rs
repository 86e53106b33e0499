//! Logout command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::error::Result;

/// Run the logout command. Idempotent: logging out while logged out is fine.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let was_authenticated = ctx.session.is_authenticated();
    ctx.session.logout();

    // The chat thread belongs to the subject that just left
    if ctx.config.conversation_id.is_some() {
        ctx.config.conversation_id = None;
        ctx.save_config()?;
    }

    if was_authenticated {
        println!("{} Logged out.", "✓".green());
    } else {
        println!("Already logged out.");
    }

    Ok(())
}
