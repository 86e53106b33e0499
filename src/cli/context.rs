//! Command execution context
//!
//! One context per invocation: loads the config, resolves the backend base
//! URL once, and wires the credential store, session manager, and API client
//! together. The session manager is an explicit instance owned here — there
//! is no ambient session state anywhere in the program.

use std::sync::Arc;

use crate::cli::args::{GlobalOptions, OutputFormat};
use crate::client::TasklightClient;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::session::{CredentialStore, SessionManager};

/// Context for command execution containing config, session, and client
pub struct CommandContext {
    /// Loaded configuration (defaults if no file exists yet)
    pub config: Config,
    /// Session and token lifecycle manager
    pub session: Arc<SessionManager>,
    /// API client routing every call through the authenticated executor
    pub client: TasklightClient,
    /// Output format preference
    pub format: OutputFormat,
    /// Config path override, kept so handlers can save config updates back
    config_path: Option<String>,
}

impl CommandContext {
    /// Build a context from the global options.
    ///
    /// The credential store lives beside the config file, so pointing
    /// `--config` at a scratch directory isolates the whole session state.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref());
        let base_url = config.api_url(opts.api_url_ref());

        let state_dir = Config::state_dir(opts.config_ref())?;
        let store = CredentialStore::new(&state_dir);
        let session = Arc::new(SessionManager::new(base_url, store)?);
        let client = TasklightClient::new(Arc::clone(&session));

        Ok(Self {
            config,
            session,
            client,
            format: opts.format,
            config_path: opts.config.clone(),
        })
    }

    /// Subject ID for resource calls, from the stored access token's claims.
    ///
    /// Deliberately ignores expiry: an expired-but-decodable token still
    /// names the subject, and the executor will refresh transparently on the
    /// resulting 401. Only a missing or undecodable token fails here.
    pub fn require_subject(&self) -> Result<String> {
        self.session
            .claims()
            .map(|claims| claims.subject_id)
            .ok_or_else(|| ApiError::Unauthenticated.into())
    }

    /// Persist the (possibly modified) config back to disk
    pub fn save_config(&self) -> Result<()> {
        self.config.save_at(self.config_path.as_deref())
    }
}
