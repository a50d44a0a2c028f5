//! Repository provider abstraction.
//!
//! The resolver core never talks to git directly; it consumes a raw tag
//! listing from the [Repository] trait. The concrete implementations are:
//!
//! - [repository::Git2Repository]: a real checkout driven by the `git2` crate
//! - [mock::MockRepository]: canned listings for testing
//!
//! Most code should depend on the trait rather than a concrete
//! implementation so the check logic stays unit-testable without a remote.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Provider of the raw tag listing for one repository checkout.
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`; checks against distinct repositories
/// are independent and may run concurrently.
pub trait Repository: Send + Sync {
    /// List all tags with their creation timestamps.
    ///
    /// Returns newline-delimited text, one tag per line, shaped as
    /// `<date> <time> <offset> <tag-name>` (git iso8601 tokens), newest
    /// first. Callers re-sort chronologically and must not rely on the
    /// listing order.
    fn tag_listing(&self) -> Result<String>;
}
