//! taskctl - Command-line companion for the Tasklight task platform

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod session;

use cli::{Cli, Commands, GlobalOptions, TaskCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Register => cli::register::run(&opts).await,
        Commands::Login => cli::login::run(&opts).await,
        Commands::Logout => cli::logout::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Whoami => cli::whoami::run(&opts).await,
        Commands::Version => {
            println!("taskctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Task(task_cmd) => match task_cmd {
            TaskCommands::List => cli::task::list(&opts).await,
            TaskCommands::Add {
                title,
                description,
                due,
            } => cli::task::add(&opts, title, description, due).await,
            TaskCommands::Get { task_id } => cli::task::get(&opts, task_id).await,
            TaskCommands::Edit {
                task_id,
                title,
                description,
                due,
            } => cli::task::edit(&opts, task_id, title, description, due).await,
            TaskCommands::Done { task_id, undo } => cli::task::done(&opts, task_id, undo).await,
            TaskCommands::Rm { task_id, yes } => cli::task::rm(&opts, task_id, yes).await,
        },
        Commands::Chat { message, new } => cli::chat::run(&opts, &message, new).await,
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}
