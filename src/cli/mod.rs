//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod chat;
pub mod completions;
pub mod context;
pub mod login;
pub mod logout;
pub mod register;
pub mod status;
pub mod task;
pub mod whoami;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// taskctl - Command-line companion for the Tasklight task platform
#[derive(Parser, Debug)]
#[command(name = "taskctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TASKCTL_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TASKCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override backend base URL
    #[arg(long = "api-url", global = true, env = "TASKCTL_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TASKCTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a Tasklight account
    Register,

    /// Log in and start a session
    Login,

    /// End the current session
    Logout,

    /// Show configuration and session status
    Status,

    /// Show the authenticated account profile
    Whoami,

    /// Display version information
    Version,

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Chat with the task assistant
    #[command(after_help = "EXAMPLES:\n  \
            taskctl chat \"what is due this week?\"   # Continue current thread\n  \
            taskctl chat --new \"hello\"              # Start a fresh thread")]
    Chat {
        /// Message to send
        message: String,

        /// Start a new conversation thread
        #[arg(long)]
        new: bool,
    },

    /// Generate shell completions
    #[command(after_help = "\
Completions:
  bash:   taskctl completion bash > /etc/bash_completion.d/taskctl
  zsh:    taskctl completion zsh > \"${fpath[1]}/_taskctl\"
  fish:   taskctl completion fish > ~/.config/fish/completions/taskctl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Task management subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List all tasks
    #[command(visible_alias = "ls")]
    List,

    /// Create a task
    #[command(after_help = "EXAMPLES:\n  \
            taskctl task add \"water the plants\"\n  \
            taskctl task add \"file taxes\" --due 2026-04-15 -d \"the fun ones\"")]
    Add {
        /// Task title
        title: String,

        /// Free-form description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },

    /// Show one task
    #[command(visible_alias = "g")]
    Get {
        /// Task ID
        task_id: String,
    },

    /// Update a task's fields
    Edit {
        /// Task ID
        task_id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },

    /// Mark a task complete (or not, with --undo)
    Done {
        /// Task ID
        task_id: String,

        /// Mark the task as not completed instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete a task
    Rm {
        /// Task ID
        task_id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
