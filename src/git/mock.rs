use crate::error::{ResourceError, Result};
use crate::git::Repository;

/// Mock repository provider for testing without actual git operations
pub struct MockRepository {
    lines: Vec<String>,
    fail_with: Option<String>,
}

impl MockRepository {
    /// Create a mock provider with an empty tag listing
    pub fn new() -> Self {
        MockRepository {
            lines: Vec::new(),
            fail_with: None,
        }
    }

    /// Create a mock provider whose listing operation fails
    pub fn failing(message: impl Into<String>) -> Self {
        MockRepository {
            lines: Vec::new(),
            fail_with: Some(message.into()),
        }
    }

    /// Append a tag line from its timestamp tokens and name.
    ///
    /// Call newest-first to mimic the descending order the real provider
    /// produces.
    pub fn add_tag(&mut self, timestamp: &str, name: &str) {
        self.lines.push(format!("{} {}", timestamp, name));
    }

    /// Append a raw listing line verbatim
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tag_listing(&self) -> Result<String> {
        if let Some(message) = &self.fail_with {
            return Err(ResourceError::repository(message.clone()));
        }

        Ok(self
            .lines
            .iter()
            .map(|line| format!("{}\n", line))
            .collect())
    }
}
