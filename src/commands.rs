//! Resource operation orchestration.
//!
//! Separates the check/in/out logic from CLI and protocol plumbing so the
//! operations can be driven programmatically against any [Repository]
//! implementation.

use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::protocol::{CheckRequest, InRequest, OutRequest, Version, VersionResponse};
use crate::resolver;
use crate::ui::LogSink;

/// Resolve new versions from any repository provider's tag listing
pub fn check_tags(
    repo: &dyn Repository,
    last_seen: Option<&str>,
    log: &dyn LogSink,
) -> Result<Vec<Version>> {
    let listing = repo.tag_listing()?;
    resolver::resolve(&listing, last_seen, log)
}

/// The check operation: clone or update the cached checkout, list its tags,
/// and report every version newer than the previously-seen one.
pub fn run_check(request: &CheckRequest, log: &dyn LogSink) -> Result<Vec<Version>> {
    log.line("Checking for new versions");

    let cache_dir = request.source.cache_path();
    let repository = Git2Repository::open_or_clone(&request.source.git_repo, &cache_dir, log)?;

    let last_seen = request
        .version
        .as_ref()
        .map(|version| version.r#ref.as_str());

    check_tags(&repository, last_seen, log)
}

/// The in operation: a pass-through that echoes the requested version
pub fn run_in(request: InRequest, log: &dyn LogSink) -> VersionResponse {
    log.line(&format!("Fetching version {}", request.version.r#ref));

    VersionResponse {
        version: request.version,
    }
}

/// The out operation: publishing is a no-op; the version is echoed back
pub fn run_out(request: OutRequest, log: &dyn LogSink) -> VersionResponse {
    log.line(&format!("Publishing version {}", request.version.r#ref));

    VersionResponse {
        version: request.version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceError;
    use crate::git::MockRepository;
    use crate::protocol::Source;
    use crate::ui::MemorySink;

    fn source() -> Source {
        Source {
            git_repo: "https://example.com/repo.git".to_string(),
            cache_dir: None,
        }
    }

    #[test]
    fn test_check_tags_reports_newest_without_last_seen() {
        let mut repo = MockRepository::new();
        repo.add_tag("2023-02-01 00:00:00 +0000", "v2");
        repo.add_tag("2023-01-01 00:00:00 +0000", "v1");

        let versions = check_tags(&repo, None, &MemorySink::new()).unwrap();
        assert_eq!(
            versions,
            vec![Version::new("v2", "2023-02-01T00:00:00.000Z")]
        );
    }

    #[test]
    fn test_check_tags_surfaces_provider_failure() {
        let repo = MockRepository::failing("could not resolve host");
        let err = check_tags(&repo, None, &MemorySink::new()).unwrap_err();
        assert!(matches!(err, ResourceError::Repository(_)));
    }

    #[test]
    fn test_run_in_echoes_version() {
        let sink = MemorySink::new();
        let request = InRequest {
            source: source(),
            version: Version::new("v1", "2023-01-01T00:00:00.000Z"),
        };

        let response = run_in(request, &sink);
        assert_eq!(
            response.version,
            Version::new("v1", "2023-01-01T00:00:00.000Z")
        );
        assert_eq!(sink.lines(), vec!["Fetching version v1"]);
    }

    #[test]
    fn test_run_out_echoes_version() {
        let request = OutRequest {
            source: source(),
            version: Version::new("v3", "2023-03-01T00:00:00.000Z"),
        };

        let response = run_out(request, &MemorySink::new());
        assert_eq!(response.version.r#ref, "v3");
    }
}
