use crate::config::PreMajorPolicy;
use crate::domain::{CommitRecord, CommitType, Version, VersionBump};

/// Outcome of version resolution
///
/// `NoRelease` is an explicit terminal value rather than an error so the
/// orchestrator can finish cleanly before touching any file. `Initial`
/// publishes the current version as-is; the orchestrator produces it
/// for a first release, the resolver never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    NoRelease,
    Release { bump: VersionBump, next: Version },
    Initial { version: Version },
}

/// Computes the next semantic version from classified commits
pub struct VersionResolver {
    policy: PreMajorPolicy,
}

impl VersionResolver {
    /// Create a resolver with the configured pre-1.0 policy
    pub fn new(policy: PreMajorPolicy) -> Self {
        VersionResolver { policy }
    }

    /// Resolve the next version from the current one and the commit set.
    ///
    /// Precedence, highest wins:
    /// 1. any breaking commit - major
    /// 2. any `feat` - minor
    /// 3. any `fix` or `perf` - patch
    /// 4. otherwise - no release
    ///
    /// Under `PreMajorPolicy::Capped` and `major == 0`, breaking maps to
    /// a minor bump and feat/fix/perf map to a patch bump.
    pub fn resolve(&self, current: Version, commits: &[CommitRecord]) -> ReleaseDecision {
        let mut has_breaking = false;
        let mut has_features = false;
        let mut has_fixes = false;

        for commit in commits {
            if commit.breaking {
                has_breaking = true;
            }

            match commit.commit_type {
                CommitType::Feat => has_features = true,
                CommitType::Fix | CommitType::Perf => has_fixes = true,
                _ => {}
            }

            // Breaking is the highest precedence, no need to keep scanning
            if has_breaking {
                break;
            }
        }

        let bump = if has_breaking {
            VersionBump::Major
        } else if has_features {
            VersionBump::Minor
        } else if has_fixes {
            VersionBump::Patch
        } else {
            return ReleaseDecision::NoRelease;
        };

        let effective = self.effective_bump(current, bump);
        ReleaseDecision::Release {
            bump: effective,
            next: current.bump(effective),
        }
    }

    /// Apply the pre-1.0 policy to a nominal bump
    fn effective_bump(&self, current: Version, bump: VersionBump) -> VersionBump {
        if current.major > 0 || self.policy == PreMajorPolicy::Uniform {
            return bump;
        }

        match bump {
            VersionBump::Major => VersionBump::Minor,
            VersionBump::Minor | VersionBump::Patch => VersionBump::Patch,
        }
    }
}
