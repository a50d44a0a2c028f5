use thiserror::Error;

/// Unified error type for git-tag-resource operations
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to parse line: {0}")]
    Parse(String),

    #[error("Tag {0} not found")]
    TagNotFound(String),

    #[error("Repository access failed: {0}")]
    Repository(String),

    #[error("No versions available: tag listing is empty")]
    NoVersions,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in git-tag-resource
pub type Result<T> = std::result::Result<T, ResourceError>;

impl ResourceError {
    /// Create a parse error carrying the offending input
    pub fn parse(raw: impl Into<String>) -> Self {
        ResourceError::Parse(raw.into())
    }

    /// Create an error for a last-seen tag missing from the listing
    pub fn tag_not_found(name: impl Into<String>) -> Self {
        ResourceError::TagNotFound(name.into())
    }

    /// Create a repository access error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        ResourceError::Repository(msg.into())
    }
}
