pub mod analyzer;
pub mod bump;
pub mod changelog;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod orchestrator;
pub mod template;
pub mod ui;

pub use error::{ReleaseError, Result};
