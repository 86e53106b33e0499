//! Chat command implementation

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::client::ChatApi;
use crate::error::Result;

/// Run the chat command.
///
/// The conversation handle is persisted in the config file so consecutive
/// invocations continue the same thread; `--new` drops it and lets the
/// backend assign a fresh one.
pub async fn run(opts: &GlobalOptions, message: &str, new_thread: bool) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let subject = ctx.require_subject()?;

    let conversation_id = if new_thread {
        None
    } else {
        ctx.config.conversation_id.clone()
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .expect("static spinner template"),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = ctx
        .client
        .send_message(&subject, message, conversation_id.as_deref())
        .await;
    spinner.finish_and_clear();

    let response = result?;

    println!("{}", response.response);
    if let Some(ref timestamp) = response.timestamp {
        println!("{}", timestamp.dimmed());
    }

    // Remember the thread the backend put us in
    if ctx.config.conversation_id.as_deref() != Some(response.conversation_id.as_str()) {
        ctx.config.conversation_id = Some(response.conversation_id);
        ctx.save_config()?;
    }

    Ok(())
}
