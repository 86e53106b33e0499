//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Consolidates the global flags into a single unit so handler signatures
/// stay small. Precedence for each option is: CLI flag > environment
/// variable > config file > default; this struct captures the CLI/env layer
/// and the config-file layer is resolved in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.taskctl/config.yaml)
    pub config: Option<String>,

    /// Backend base URL override (bypasses config file)
    pub api_url: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
        }
    }

    /// Get config path as `Option<&str>`
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get base URL override as `Option<&str>`
    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }
}
