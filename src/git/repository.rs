use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use crate::git::{LogEntry, Vcs};
use git2::{Oid, Repository};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Real [Vcs] implementation over a git2 repository
pub struct Git2Vcs {
    repo: Repository,
}

impl Git2Vcs {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2Vcs { repo })
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        head.target()
            .ok_or_else(|| ReleaseError::vcs("HEAD is detached or invalid"))
    }

    /// Map every tag's peeled OID to its name.
    ///
    /// Handles both lightweight and annotated tags.
    fn tag_oids(&self) -> Result<HashMap<Oid, String>> {
        let mut tag_oids = HashMap::new();
        let tags = self.repo.tag_names(None)?;

        for tag_name in tags.iter().flatten() {
            if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(tag_obj) = tag_ref.peel(git2::ObjectType::Any) {
                    tag_oids.insert(tag_obj.id(), tag_name.to_string());
                }
            }
        }

        Ok(tag_oids)
    }

    fn resolve_tag_oid(&self, tag_name: &str) -> Option<Oid> {
        self.repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .ok()
            .and_then(|r| r.peel(git2::ObjectType::Any).ok())
            .map(|obj| obj.id())
    }
}

impl Vcs for Git2Vcs {
    fn find_latest_version_tag(&self, prefix: &str) -> Result<Option<String>> {
        let head = self.head_oid()?;
        let tag_oids = self.tag_oids()?;

        // Walk history from HEAD backwards; the first version tag we
        // meet is the most recent release
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head)?;

        for oid in revwalk {
            let oid = oid?;
            if let Some(tag_name) = tag_oids.get(&oid) {
                let rest = match tag_name.strip_prefix(prefix) {
                    Some(rest) => rest,
                    None => continue,
                };
                if Version::parse(rest).is_ok() {
                    return Ok(Some(tag_name.clone()));
                }
            }
        }

        Ok(None)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<LogEntry>> {
        let head = self.head_oid()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head)?;

        let stop_oid = tag.and_then(|name| self.resolve_tag_oid(name));

        let mut entries = Vec::new();
        for oid in revwalk {
            let oid = oid?;

            if Some(oid) == stop_oid {
                break;
            }

            let commit = self.repo.find_commit(oid)?;
            entries.push(LogEntry {
                hash: oid.to_string(),
                message: commit.message().unwrap_or("(empty message)").to_string(),
            });
        }

        // Chronological order, oldest first
        entries.reverse();
        Ok(entries)
    }

    fn commit(&self, message: &str, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index
                .add_path(path)
                .map_err(|e| ReleaseError::vcs(format!("Cannot stage '{}': {}", path.display(), e)))?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .map_err(|e| ReleaseError::vcs(format!("Commit failed: {}", e)))?;

        Ok(())
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| ReleaseError::vcs(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }
}

// SAFETY: Git2Vcs wraps git2::Repository which is Send. A Git2Vcs is
// owned by exactly one in-flight release run; libgit2 is thread-safe
// for the read paths exercised through this trait.
unsafe impl Sync for Git2Vcs {}
