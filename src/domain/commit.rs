use regex::Regex;

/// Conventional commit type taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Perf,
    Deps,
    Revert,
    Test,
    Ci,
    Build,
    Refactor,
    Docs,
    Style,
    Chore,
    /// Anything that does not parse as a conventional commit
    Other,
}

impl CommitType {
    /// Map a raw type token to a known commit type.
    ///
    /// Unrecognized tokens classify as [CommitType::Other] so the commit
    /// stays in history but outside any default changelog section.
    pub fn from_token(token: &str) -> Self {
        match token {
            "feat" => CommitType::Feat,
            "fix" => CommitType::Fix,
            "perf" => CommitType::Perf,
            "deps" => CommitType::Deps,
            "revert" => CommitType::Revert,
            "test" => CommitType::Test,
            "ci" => CommitType::Ci,
            "build" => CommitType::Build,
            "refactor" => CommitType::Refactor,
            "docs" => CommitType::Docs,
            "style" => CommitType::Style,
            "chore" => CommitType::Chore,
            _ => CommitType::Other,
        }
    }

    /// Canonical token used in configuration and changelog mapping
    pub fn token(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Perf => "perf",
            CommitType::Deps => "deps",
            CommitType::Revert => "revert",
            CommitType::Test => "test",
            CommitType::Ci => "ci",
            CommitType::Build => "build",
            CommitType::Refactor => "refactor",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Chore => "chore",
            CommitType::Other => "other",
        }
    }
}

/// Parsed representation of one commit log entry
///
/// Created once per log line and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub raw_message: String,
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub subject: String,
    pub breaking: bool,
}

impl CommitRecord {
    /// Parse a commit message according to the conventional commits grammar.
    ///
    /// Supported formats:
    /// - type(scope)!: subject
    /// - type(scope): subject
    /// - type!: subject
    /// - type: subject
    /// - non-conventional text (classified as `other`)
    ///
    /// A `BREAKING CHANGE:` or `BREAKING-CHANGE:` footer marks the commit
    /// breaking regardless of its type.
    pub fn parse(hash: impl Into<String>, message: &str) -> Self {
        let hash = hash.into();
        let footer_breaking =
            message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:");

        // Try format: type(scope)!: subject
        if let Some(captures) = Regex::new(r"^([a-z]+)\(([^)]+)\)(!?):\s*(.*)")
            .ok()
            .and_then(|re| re.captures(message))
        {
            let token = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let scope = captures.get(2).map(|m| m.as_str().to_string());
            let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
            let subject = captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            return CommitRecord {
                hash,
                raw_message: message.to_string(),
                commit_type: CommitType::from_token(token),
                scope,
                subject,
                breaking: has_exclamation || footer_breaking,
            };
        }

        // Try format: type!: subject / type: subject
        if let Some(captures) = Regex::new(r"^([a-z]+)(!?):\s*(.*)")
            .ok()
            .and_then(|re| re.captures(message))
        {
            let token = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let has_exclamation = captures.get(2).map(|m| m.as_str()) == Some("!");
            let subject = captures
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            return CommitRecord {
                hash,
                raw_message: message.to_string(),
                commit_type: CommitType::from_token(token),
                scope: None,
                subject,
                breaking: has_exclamation || footer_breaking,
            };
        }

        // Default: non-conventional commit, first line as subject
        CommitRecord {
            hash,
            raw_message: message.to_string(),
            commit_type: CommitType::Other,
            scope: None,
            subject: message.lines().next().unwrap_or_default().to_string(),
            breaking: footer_breaking,
        }
    }

    /// Short hash for display and changelog entries
    pub fn short_hash(&self) -> &str {
        if self.hash.len() > 7 {
            &self.hash[..7]
        } else {
            &self.hash
        }
    }
}

/// Classify raw log entries into commit records, order-preserving.
///
/// Every entry yields exactly one record; entries that do not match the
/// grammar are kept as `other` rather than dropped.
pub fn classify(entries: &[(String, String)]) -> Vec<CommitRecord> {
    entries
        .iter()
        .map(|(hash, message)| CommitRecord::parse(hash.clone(), message))
        .collect()
}
