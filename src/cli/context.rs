//! Shared command context for CLI commands

use gh_steward::config::Config;
use gh_steward::error::Result;
use gh_steward::platform::{GitHubService, RepoService};

/// Shared context for CLI commands that talk to the remote repository
///
/// Owns the configuration and the platform service; every command borrows
/// from here instead of reading ambient state.
pub struct CommandContext {
    /// Process configuration, loaded once at startup
    pub config: Config,
    /// Remote repository service
    pub platform: Box<dyn RepoService>,
}

impl CommandContext {
    /// Build the context from loaded configuration.
    pub fn new(config: Config) -> Result<Self> {
        let platform = GitHubService::new(&config)?;
        Ok(Self {
            config,
            platform: Box::new(platform),
        })
    }
}
