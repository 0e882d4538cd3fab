//! Bump file editing
//!
//! Rewrites the version field of configured files in place. The locator
//! for each format must match exactly one site; replacement is textual,
//! so unrelated keys, ordering and whitespace survive byte-for-byte.
//! A set of files is written all-or-nothing: any failure restores the
//! files already written in the same run.

use crate::config::BumpFileSpec;
use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Locates and rewrites version fields in bump files
pub struct BumpFileEditor {
    root: PathBuf,
}

impl BumpFileEditor {
    /// Create an editor resolving filenames against a project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BumpFileEditor { root: root.into() }
    }

    fn path_for(&self, spec: &BumpFileSpec) -> PathBuf {
        self.root.join(&spec.filename)
    }

    /// Read the current version from a bump file
    pub fn read_version(&self, spec: &BumpFileSpec) -> Result<Version> {
        let content = fs::read_to_string(self.path_for(spec))?;
        let range = locate(spec, &content)?;
        Version::parse(&content[range])
    }

    /// Write a new version into every file of the set, atomically.
    ///
    /// Files are rewritten one by one via temp-file-then-rename. If any
    /// file fails (locator ambiguity, unsupported format, I/O), every
    /// file already written in this run is restored to its pre-run
    /// content before the error is returned.
    pub fn write_all(&self, specs: &[BumpFileSpec], new_version: &Version) -> Result<()> {
        let mut written: Vec<(PathBuf, String)> = Vec::new();

        for spec in specs {
            let path = self.path_for(spec);
            match self.write_one(spec, &path, new_version) {
                Ok(original) => written.push((path, original)),
                Err(e) => {
                    // Best-effort rollback of everything already written
                    for (path, original) in &written {
                        let _ = atomic_write(path, original);
                    }
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Rewrite one file, returning its pre-run content for rollback
    fn write_one(&self, spec: &BumpFileSpec, path: &Path, new_version: &Version) -> Result<String> {
        let content = fs::read_to_string(path)?;
        let range = locate(spec, &content)?;

        let mut updated = String::with_capacity(content.len());
        updated.push_str(&content[..range.start]);
        updated.push_str(&new_version.to_string());
        updated.push_str(&content[range.end..]);

        atomic_write(path, &updated)?;
        Ok(content)
    }
}

/// Byte range of the version value recognized by the spec's format.
///
/// Exactly one match is required; zero or more than one fail with
/// [ReleaseError::AmbiguousLocation]. Unknown format tokens fail with
/// [ReleaseError::UnsupportedFormat].
fn locate(spec: &BumpFileSpec, content: &str) -> Result<Range<usize>> {
    let mut ranges = Vec::new();

    match spec.format.as_str() {
        "json" => {
            let re = Regex::new(r#""version"\s*:\s*"([^"]*)""#)
                .expect("json version locator pattern is valid");
            for captures in re.captures_iter(content) {
                let (Some(whole), Some(value)) = (captures.get(0), captures.get(1)) else {
                    continue;
                };
                // Only the manifest's own version field counts;
                // dependency entries nest deeper
                if depth_at(content, whole.start()) == 1 {
                    ranges.push(value.range());
                }
            }
        }
        "plain" => {
            let pattern = spec.pattern.as_deref().ok_or_else(|| {
                ReleaseError::config(format!(
                    "Bump file '{}' uses plain format but has no pattern",
                    spec.filename
                ))
            })?;
            let re = Regex::new(pattern)
                .map_err(|e| ReleaseError::config(format!("Invalid pattern: {}", e)))?;
            for captures in re.captures_iter(content) {
                if let Some(m) = captures.get(1) {
                    ranges.push(m.range());
                }
            }
        }
        other => {
            return Err(ReleaseError::UnsupportedFormat {
                kind: other.to_string(),
            })
        }
    }

    match ranges.len() {
        1 => Ok(ranges.remove(0)),
        n => Err(ReleaseError::AmbiguousLocation {
            file: spec.filename.clone(),
            matches: n,
        }),
    }
}

/// Brace and bracket nesting depth at a byte offset, ignoring anything
/// inside string literals
fn depth_at(content: &str, offset: usize) -> usize {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in content.bytes().enumerate() {
        if i == offset {
            break;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' | b'[' if !in_string => depth += 1,
            b'}' | b']' if !in_string => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    depth
}

/// Write content to a temp file next to the target, then rename over it
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("relver.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
