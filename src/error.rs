use thiserror::Error;

/// Unified error type for relver operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Ambiguous version location in '{file}': expected exactly one match, found {matches}")]
    AmbiguousLocation { file: String, matches: usize },

    #[error("Unsupported bump file format: {kind}")]
    UnsupportedFormat { kind: String },

    #[error("Hook '{name}' failed with exit code {code}\nStdout: {stdout}\nStderr: {stderr}")]
    Hook {
        name: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("VCS operation failed: {0}")]
    Vcs(String),

    #[error("Release failed at step '{state}': {source}")]
    Step {
        state: &'static str,
        #[source]
        source: Box<ReleaseError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in relver
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a changelog error with context
    pub fn changelog(msg: impl Into<String>) -> Self {
        ReleaseError::Changelog(msg.into())
    }

    /// Create a VCS error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        ReleaseError::Vcs(msg.into())
    }

    /// Wrap an error with the lifecycle state it occurred in
    pub fn at_step(state: &'static str, source: ReleaseError) -> Self {
        ReleaseError::Step {
            state,
            source: Box::new(source),
        }
    }
}
