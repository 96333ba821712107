//! Error types for gh-steward

use thiserror::Error;

/// Result alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during steward operations
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is missing
    #[error("missing required environment variable {0}")]
    Config(String),

    /// The remote rejected a request with a non-2xx status
    #[error("GitHub rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message from the response body, if any
        message: String,
    },

    /// Optimistic-concurrency mismatch on a file write
    #[error("version conflict writing {path}: the file changed on the remote")]
    VersionConflict {
        /// Repository path of the file
        path: String,
    },

    /// A branch, file, or pull request does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A contents path resolved to a directory listing
    #[error("path '{0}' refers to a directory, not a file")]
    Directory(String),

    /// A ref with this name already exists
    #[error("branch '{0}' already exists")]
    AlreadyExists(String),

    /// Error from the octocrab GitHub client
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote returned a payload we could not interpret
    #[error("failed to decode remote payload: {0}")]
    Decode(String),

    /// Internal error (terminal interaction, invariant breakage)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors that indicate the target simply does not exist,
    /// as opposed to a degraded or rejected interaction.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
