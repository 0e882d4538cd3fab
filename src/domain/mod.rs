//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod version;

pub use commit::{classify, CommitRecord, CommitType};
pub use version::{Version, VersionBump, VersionTag};
