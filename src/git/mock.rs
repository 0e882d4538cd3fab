use crate::error::{ReleaseError, Result};
use crate::git::{LogEntry, Vcs};
use std::path::PathBuf;
use std::sync::Mutex;

/// Mock VCS for testing without a real repository
///
/// Seeded with a commit log and an optional latest tag; records every
/// commit and tag operation issued against it. Either operation can be
/// made to fail to exercise error paths.
pub struct MockVcs {
    latest_tag: Option<String>,
    log: Vec<LogEntry>,
    fail_commit: Option<String>,
    fail_tag: Option<String>,
    commits: Mutex<Vec<(String, Vec<PathBuf>)>>,
    tags: Mutex<Vec<(String, String)>>,
}

impl MockVcs {
    /// Create an empty mock repository
    pub fn new() -> Self {
        MockVcs {
            latest_tag: None,
            log: Vec::new(),
            fail_commit: None,
            fail_tag: None,
            commits: Mutex::new(Vec::new()),
            tags: Mutex::new(Vec::new()),
        }
    }

    /// Seed the latest version tag
    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    /// Seed the commit log (chronological order, oldest first)
    pub fn with_log(mut self, entries: Vec<(&str, &str)>) -> Self {
        self.log = entries
            .into_iter()
            .map(|(hash, message)| LogEntry {
                hash: hash.to_string(),
                message: message.to_string(),
            })
            .collect();
        self
    }

    /// Make the commit operation fail with the given message
    pub fn failing_commit(mut self, message: impl Into<String>) -> Self {
        self.fail_commit = Some(message.into());
        self
    }

    /// Make the tag operation fail with the given message
    pub fn failing_tag(mut self, message: impl Into<String>) -> Self {
        self.fail_tag = Some(message.into());
        self
    }

    /// Commits issued so far, as (message, staged paths)
    pub fn issued_commits(&self) -> Vec<(String, Vec<PathBuf>)> {
        self.commits.lock().unwrap().clone()
    }

    /// Tags issued so far, as (name, message)
    pub fn issued_tags(&self) -> Vec<(String, String)> {
        self.tags.lock().unwrap().clone()
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcs for MockVcs {
    fn find_latest_version_tag(&self, _prefix: &str) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    fn commits_since(&self, _tag: Option<&str>) -> Result<Vec<LogEntry>> {
        Ok(self.log.clone())
    }

    fn commit(&self, message: &str, paths: &[PathBuf]) -> Result<()> {
        if let Some(reason) = &self.fail_commit {
            return Err(ReleaseError::vcs(reason.clone()));
        }
        self.commits
            .lock()
            .unwrap()
            .push((message.to_string(), paths.to_vec()));
        Ok(())
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        if let Some(reason) = &self.fail_tag {
            return Err(ReleaseError::vcs(reason.clone()));
        }
        self.tags
            .lock()
            .unwrap()
            .push((name.to_string(), message.to_string()));
        Ok(())
    }
}
