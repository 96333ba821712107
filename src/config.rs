//! Configuration loaded once at process start
//!
//! All settings come from the environment. The resulting [`Config`] is
//! constructed in `main` and passed by parameter into every component;
//! nothing reads ambient global state after startup.

use crate::error::{Error, Result};
use std::env;

/// Environment variable holding the API token.
pub const TOKEN_VAR: &str = "GITHUB_API_KEY";
/// Environment variable holding the repository owner.
pub const OWNER_VAR: &str = "GITHUB_OWNER";
/// Environment variable holding the repository name.
pub const REPO_VAR: &str = "GITHUB_REPO";
/// Environment variable holding the optional default file path.
pub const FILE_PATH_VAR: &str = "GITHUB_FILE_PATH";

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Personal access token for the hosting API
    pub token: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Default file path for the seed workflow
    pub default_file_path: Option<String>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Fails with the name of the first missing required variable, before
    /// any remote interaction can happen.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |var: &str| get(var).ok_or_else(|| Error::Config(var.to_string()));

        Ok(Self {
            token: required(TOKEN_VAR)?,
            owner: required(OWNER_VAR)?,
            repo: required(REPO_VAR)?,
            default_file_path: get(FILE_PATH_VAR),
        })
    }

    /// The `owner/repo` slug used in progress output.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
