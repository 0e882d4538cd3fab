use crate::error::{ReleaseError, Result};
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string (e.g., "1.2.3" or "v1.2.3")
    pub fn parse(input: &str) -> Result<Self> {
        let clean = input.trim_start_matches('v').trim_start_matches('V');

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                input
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| ReleaseError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| ReleaseError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| ReleaseError::version(format!("Invalid patch version: {}", parts[2])))?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to bump type
    pub fn bump(&self, bump_type: VersionBump) -> Self {
        match bump_type {
            VersionBump::Major => Version {
                major: self.major + 1,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor + 1,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch + 1,
            },
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

/// A semantic version together with its tag prefix (usually "v")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub version: Version,
    pub prefix: String,
}

impl VersionTag {
    /// Create a tag from a version and prefix
    pub fn new(version: Version, prefix: impl Into<String>) -> Self {
        VersionTag {
            version,
            prefix: prefix.into(),
        }
    }

    /// Parse a tag name with a known prefix (e.g., "v1.2.3" with prefix "v")
    pub fn parse(tag: &str, prefix: &str) -> Result<Self> {
        let rest = tag.strip_prefix(prefix).ok_or_else(|| {
            ReleaseError::version(format!(
                "Tag '{}' does not start with prefix '{}'",
                tag, prefix
            ))
        })?;

        Ok(VersionTag {
            version: Version::parse(rest)?,
            prefix: prefix.to_string(),
        })
    }

    /// Tag for the same prefix at a different version
    pub fn with_version(&self, version: Version) -> Self {
        VersionTag {
            version,
            prefix: self.prefix.clone(),
        }
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_with_prefix() {
        assert_eq!(Version::parse("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(Version::parse("V1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("a.b.c").is_err());
    }

    #[test]
    fn test_version_bump_major() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(VersionBump::Major), Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(VersionBump::Minor), Version::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(VersionBump::Patch), Version::new(1, 2, 4));
    }

    #[test]
    fn test_version_ordering_is_monotone_under_bump() {
        let v = Version::new(0, 9, 9);
        for bump in [VersionBump::Major, VersionBump::Minor, VersionBump::Patch] {
            assert!(v.bump(bump) > v);
        }
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn test_version_tag_display() {
        let tag = VersionTag::new(Version::new(1, 3, 0), "v");
        assert_eq!(tag.to_string(), "v1.3.0");

        let bare = VersionTag::new(Version::new(1, 3, 0), "");
        assert_eq!(bare.to_string(), "1.3.0");
    }

    #[test]
    fn test_version_tag_parse() {
        let tag = VersionTag::parse("v1.2.3", "v").unwrap();
        assert_eq!(tag.version, Version::new(1, 2, 3));
        assert_eq!(tag.prefix, "v");
    }

    #[test]
    fn test_version_tag_parse_wrong_prefix() {
        assert!(VersionTag::parse("release-1.2.3", "v").is_err());
    }

    #[test]
    fn test_version_tag_with_version() {
        let tag = VersionTag::parse("v1.2.3", "v").unwrap();
        let next = tag.with_version(Version::new(1, 3, 0));
        assert_eq!(next.to_string(), "v1.3.0");
    }
}
