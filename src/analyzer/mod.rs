//! Commit analysis and next-version resolution

pub mod version_resolver;

pub use version_resolver::{ReleaseDecision, VersionResolver};
