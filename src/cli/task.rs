//! Task command implementations

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use log::debug;

use crate::cli::args::{GlobalOptions, OutputFormat};
use crate::cli::context::CommandContext;
use crate::client::TaskApi;
use crate::client::models::{Task, TaskCreate, TaskUpdate};
use crate::error::Result;
use crate::output::formatters::{TaskRow, format_timestamp};
use crate::output::{json, table};

/// List all tasks for the current subject
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let subject = ctx.require_subject()?;

    debug!("listing tasks for subject {}", subject);
    let tasks = ctx.client.list_tasks(&subject).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&tasks)?),
        OutputFormat::Table => {
            let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Pretty => {
            let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
            println!("{}", table::format_table(&rows));
            let open = tasks.iter().filter(|t| !t.is_completed).count();
            println!("{} task(s), {} open", tasks.len(), open);
        }
    }

    Ok(())
}

/// Create a task
pub async fn add(
    opts: &GlobalOptions,
    title: String,
    description: Option<String>,
    due: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let subject = ctx.require_subject()?;

    let body = TaskCreate {
        title,
        description,
        due_date: due.map(normalize_due_date),
    };

    let task = ctx.client.create_task(&subject, &body).await?;
    println!("{} Created task {} ({})", "✓".green(), task.title.bold(), task.id);

    Ok(())
}

/// Show one task
pub async fn get(opts: &GlobalOptions, task_id: String) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let subject = ctx.require_subject()?;

    let task = ctx.client.get_task(&subject, &task_id).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&task)?),
        OutputFormat::Table => {
            let rows = vec![TaskRow::from(&task)];
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Pretty => print_task(&task),
    }

    Ok(())
}

/// Update task fields
pub async fn edit(
    opts: &GlobalOptions,
    task_id: String,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
) -> Result<()> {
    if title.is_none() && description.is_none() && due.is_none() {
        println!("Nothing to update. Pass --title, --description, or --due.");
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let subject = ctx.require_subject()?;

    let update = TaskUpdate {
        title,
        description,
        is_completed: None,
        due_date: due.map(normalize_due_date),
    };

    let task = ctx.client.update_task(&subject, &task_id, &update).await?;
    println!("{} Updated task {} ({})", "✓".green(), task.title.bold(), task.id);

    Ok(())
}

/// Set a task's completion flag
pub async fn done(opts: &GlobalOptions, task_id: String, undo: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let subject = ctx.require_subject()?;

    let task = ctx
        .client
        .set_task_completion(&subject, &task_id, !undo)
        .await?;

    if task.is_completed {
        println!("{} Completed {}", "✓".green(), task.title.bold());
    } else {
        println!("{} Reopened {}", "○".yellow(), task.title.bold());
    }

    Ok(())
}

/// Delete a task
pub async fn rm(opts: &GlobalOptions, task_id: String, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let subject = ctx.require_subject()?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete task {}?", task_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_task(&subject, &task_id).await?;
    println!("{} Deleted task {}", "✓".green(), task_id);

    Ok(())
}

fn print_task(task: &Task) {
    let mark = if task.is_completed { "✓".green() } else { "○".yellow() };
    println!("{} {} ({})", mark, task.title.bold(), task.id);
    if let Some(ref description) = task.description {
        println!("  {}", description);
    }
    println!("  Due: {}", format_timestamp(task.due_date.as_deref()));
    println!(
        "  Created: {}   Updated: {}",
        format_timestamp(task.created_at.as_deref()),
        format_timestamp(task.updated_at.as_deref())
    );
}

/// Accept bare `YYYY-MM-DD` due dates and expand them to RFC 3339 at
/// start-of-day UTC; anything else is passed through for the backend to
/// validate.
fn normalize_due_date(raw: String) -> String {
    match chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => format!("{}T00:00:00Z", date),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_due_date_expands_bare_date() {
        assert_eq!(
            normalize_due_date("2026-04-15".to_string()),
            "2026-04-15T00:00:00Z"
        );
    }

    #[test]
    fn test_normalize_due_date_passes_through_rfc3339() {
        assert_eq!(
            normalize_due_date("2026-04-15T09:30:00Z".to_string()),
            "2026-04-15T09:30:00Z"
        );
    }
}
