//! Version-control abstraction layer
//!
//! The engine never implements git itself; it calls a [Vcs]
//! collaborator. [repository::Git2Vcs] is the real implementation over
//! the `git2` crate, [mock::MockVcs] records issued operations for
//! tests. Code should depend on the trait, not the concrete types.

pub mod mock;
pub mod repository;

pub use mock::MockVcs;
pub use repository::Git2Vcs;

use crate::error::Result;
use std::path::PathBuf;

/// One raw commit log entry, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Full commit hash
    pub hash: String,
    /// Full commit message
    pub message: String,
}

/// Version-control operations the release engine needs
///
/// Implementors must be `Send + Sync`. All methods map underlying
/// errors into [crate::error::ReleaseError] variants.
pub trait Vcs: Send + Sync {
    /// Find the most recent tag reachable from HEAD whose name is the
    /// configured prefix followed by a semantic version
    fn find_latest_version_tag(&self, prefix: &str) -> Result<Option<String>>;

    /// Commits from HEAD back to (excluding) the given tag, in
    /// chronological order, oldest first. With no tag, all of history.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<LogEntry>>;

    /// Stage the given paths and create a commit on HEAD
    fn commit(&self, message: &str, paths: &[PathBuf]) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn tag(&self, name: &str, message: &str) -> Result<()>;
}
