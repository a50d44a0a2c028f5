use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resource configuration supplied by the CI harness.
///
/// Arrives as the `source` object of every request. The repository checkout
/// is cached between invocations; `cache_dir` makes that location explicit
/// so tests and deployments can isolate state.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Source {
    /// Location of the remote repository to watch (URL or local path)
    pub git_repo: String,

    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Source {
    /// Resolve the checkout directory for this source.
    ///
    /// Uses `cache_dir` when configured, otherwise a per-repository
    /// directory under the user cache dir (falling back to the system
    /// temp dir when no cache dir is known).
    pub fn cache_path(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }

        let slug: String = self
            .git_repo
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();

        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("git-tag-resource")
            .join(slug)
    }
}

/// The externally-exchanged representation of one tag.
///
/// `timestamp` is optional on input (the harness may send only the ref)
/// and always set on output, rendered as an ISO-8601 UTC instant.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Version {
    pub r#ref: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Version {
    pub fn new(r#ref: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Version {
            r#ref: r#ref.into(),
            timestamp: Some(timestamp.into()),
        }
    }
}

/// Request payload for the check operation
#[derive(Debug, Deserialize, Clone)]
pub struct CheckRequest {
    pub source: Source,

    #[serde(default)]
    pub version: Option<Version>,
}

/// Request payload for the in (fetch) operation
#[derive(Debug, Deserialize, Clone)]
pub struct InRequest {
    pub source: Source,
    pub version: Version,
}

/// Request payload for the out (publish) operation
#[derive(Debug, Deserialize, Clone)]
pub struct OutRequest {
    pub source: Source,
    pub version: Version,
}

/// Response payload for the in and out operations: the version, unchanged
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct VersionResponse {
    pub version: Version,
}
