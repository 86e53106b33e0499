//! Durable credential storage
//!
//! Two named slots (access token, refresh token) persisted as a small JSON
//! document next to the config file. Pure storage: no validation, no expiry
//! logic. Reads are safe before any session exists — a missing or unreadable
//! file is "absent", never an error.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Credential file name inside the state directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// Which of the two credential slots to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Short-lived bearer token attached to requests
    Access,
    /// Longer-lived token used solely to obtain a new access token
    Refresh,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Slots {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// File-backed store for the credential pair
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store persisting to `dir/credentials.json`
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(CREDENTIALS_FILE),
        }
    }

    /// Read one slot. Absent file, unreadable file, or empty slot all read
    /// as `None`.
    pub fn get(&self, kind: CredentialKind) -> Option<String> {
        let slots = self.load();
        match kind {
            CredentialKind::Access => slots.access_token,
            CredentialKind::Refresh => slots.refresh_token,
        }
    }

    /// Write one slot, leaving the other untouched.
    pub fn set(&self, kind: CredentialKind, value: &str) -> Result<()> {
        let mut slots = self.load();
        match kind {
            CredentialKind::Access => slots.access_token = Some(value.to_string()),
            CredentialKind::Refresh => slots.refresh_token = Some(value.to_string()),
        }
        self.save(&slots)
    }

    /// Clear one slot, leaving the other untouched.
    pub fn clear(&self, kind: CredentialKind) -> Result<()> {
        let mut slots = self.load();
        match kind {
            CredentialKind::Access => slots.access_token = None,
            CredentialKind::Refresh => slots.refresh_token = None,
        }
        self.save(&slots)
    }

    /// Clear both slots.
    pub fn clear_all(&self) -> Result<()> {
        self.save(&Slots::default())
    }

    fn load(&self) -> Slots {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable credential file: {}", e);
                Slots::default()
            }),
            Err(_) => Slots::default(),
        }
    }

    fn save(&self, slots: &Slots) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(slots)?;
        std::fs::write(&self.path, contents)?;

        // Credentials are secrets: owner-only on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}
