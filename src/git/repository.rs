use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use git2::Repository as Git2Repo;

use crate::error::{ResourceError, Result};
use crate::ui::LogSink;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open an existing checkout
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path)?;

        Ok(Git2Repository { repo })
    }

    /// Clone the remote into `cache_dir`, or reuse the checkout already there.
    ///
    /// Idempotent across invocations: the first call clones, later calls
    /// open the cached checkout and refresh its tags from `origin`. The
    /// underlying git diagnostic is reported to the log sink before either
    /// failure is returned.
    ///
    /// # Arguments
    /// * `url` - Remote repository location (URL or local path)
    /// * `cache_dir` - Directory holding the cached checkout
    /// * `log` - Sink for operator-visible diagnostics
    pub fn open_or_clone(url: &str, cache_dir: &Path, log: &dyn LogSink) -> Result<Self> {
        if cache_dir.join(".git").exists() {
            let repository = Self::open(cache_dir)?;
            repository.fetch_tags(log)?;
            return Ok(repository);
        }

        std::fs::create_dir_all(cache_dir)?;

        match Git2Repo::clone(url, cache_dir) {
            Ok(repo) => Ok(Git2Repository { repo }),
            Err(e) => {
                log.line(e.message());
                Err(ResourceError::repository(format!(
                    "Failed to clone git repo: {}",
                    e.message()
                )))
            }
        }
    }

    /// Fetch all tags from origin into the cached checkout
    fn fetch_tags(&self, log: &dyn LogSink) -> Result<()> {
        let mut remote = self.repo.find_remote("origin").map_err(|e| {
            log.line(e.message());
            ResourceError::repository(format!("Failed to update git repo: {}", e.message()))
        })?;

        remote
            .fetch(&["+refs/tags/*:refs/tags/*"], None, None)
            .map_err(|e| {
                log.line(e.message());
                ResourceError::repository(format!("Failed to update git repo: {}", e.message()))
            })?;

        Ok(())
    }

    /// Creation time of one tag: tagger date for annotated tags, committer
    /// date for lightweight ones (git's creatordate).
    fn creation_time(&self, tag_name: &str) -> Result<git2::Time> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", tag_name))?;

        if let Ok(tag) = reference.peel_to_tag() {
            if let Some(tagger) = tag.tagger() {
                return Ok(tagger.when());
            }
        }

        Ok(reference.peel_to_commit()?.time())
    }
}

impl super::Repository for Git2Repository {
    fn tag_listing(&self) -> Result<String> {
        let mut entries: Vec<(git2::Time, String)> = Vec::new();

        for tag_name in self.repo.tag_names(None)?.iter().flatten() {
            entries.push((self.creation_time(tag_name)?, tag_name.to_string()));
        }

        // Newest first, like `git tag --sort=-creatordate`
        entries.sort_by(|a, b| b.0.seconds().cmp(&a.0.seconds()));

        let mut listing = String::new();
        for (time, tag_name) in entries {
            listing.push_str(&format!("{} {}\n", format_creator_date(&time)?, tag_name));
        }

        Ok(listing)
    }
}

/// Render a git time as iso8601 tokens: `2023-01-01 00:00:00 +0000`
fn format_creator_date(time: &git2::Time) -> Result<String> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).ok_or_else(|| {
        ResourceError::repository(format!(
            "invalid tag timezone offset: {}",
            time.offset_minutes()
        ))
    })?;

    let instant = DateTime::<Utc>::from_timestamp(time.seconds(), 0)
        .ok_or_else(|| ResourceError::repository(format!("invalid tag time: {}", time.seconds())))?;

    Ok(instant
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string())
}

// SAFETY: Git2Repository wraps git2::Repository, which is Send but not Sync.
// libgit2 is thread-safe for the read operations used here; each check
// invocation owns its repository exclusively.
unsafe impl Sync for Git2Repository {}
