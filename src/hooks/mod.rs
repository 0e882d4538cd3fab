//! Lifecycle hook execution
//!
//! Users can run custom commands at fixed points of the release:
//! prebump/postbump around file rewrites, precommit/postcommit around
//! the release commit, pretag/posttag around tagging.

pub mod executor;
pub mod lifecycle;

pub use executor::{CommandOutput, CommandRunner, HookExecutor, ShellRunner};
pub use lifecycle::{HookContext, HookSlot};
