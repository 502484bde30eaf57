//! # Connection Profiles
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = http://localhost:8080
//!
//! [staging]
//! server = https://staging.example.com
//! ```
//!
//! A missing file or a missing section is not an error; callers fall back to
//! the blank profile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ini::Ini;

use crate::config::DEFAULT_SERVER;

const SERVER_KEY: &str = "server";

/// A named set of connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniProfile {
    name: String,
    server: Option<String>,
}

impl IniProfile {
    pub fn new(name: impl Into<String>, server: Option<String>) -> Self {
        Self {
            name: name.into(),
            server,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// Base URL to talk to, falling back to the local default server
    pub fn server_or_default(&self) -> &str {
        self.server().unwrap_or(DEFAULT_SERVER)
    }

    /// Replace the server, used by the `--server` override
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }
}

/// Profile used when nothing is configured
pub fn get_blank_profile() -> IniProfile {
    IniProfile::new("blank", None)
}

/// Reads profiles from an INI file on disk
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    /// Create a store for `path`; a leading `~` is expanded to the home directory
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a profile by section name
    pub fn get_profile(&self, name: &str) -> Result<Option<IniProfile>> {
        if !self.path.exists() {
            tracing::debug!("Profile file {} does not exist", self.path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("failed to read profile file {}", self.path.display()))?;

        Ok(ini.section(Some(name)).map(|section| {
            IniProfile::new(
                name,
                section
                    .get(SERVER_KEY)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            )
        }))
    }
}

/// Pick the profile for a session: the named one if configured, else the
/// blank profile, with an optional server override on top
pub fn resolve_profile(
    store: &IniProfileStore,
    name: &str,
    server_override: Option<&str>,
) -> Result<IniProfile> {
    let profile = match store.get_profile(name)? {
        Some(profile) => {
            tracing::debug!("Profile '{name}' loaded, server: {:?}", profile.server());
            profile
        }
        None => {
            tracing::debug!("Profile '{name}' not found, using blank profile");
            get_blank_profile()
        }
    };

    Ok(match server_override {
        Some(server) => profile.with_server(server),
        None => profile,
    })
}
