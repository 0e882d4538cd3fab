use std::collections::HashMap;

/// Hook slots available in the release lifecycle
///
/// Each slot runs at most once per release; a slot with no configured
/// script is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookSlot {
    Prebump,
    Postbump,
    Precommit,
    Postcommit,
    Pretag,
    Posttag,
}

impl HookSlot {
    /// Get the hook name as used in the `scripts` configuration table
    pub fn name(&self) -> &'static str {
        match self {
            HookSlot::Prebump => "prebump",
            HookSlot::Postbump => "postbump",
            HookSlot::Precommit => "precommit",
            HookSlot::Postcommit => "postcommit",
            HookSlot::Pretag => "pretag",
            HookSlot::Posttag => "posttag",
        }
    }
}

/// Values substituted into hook command templates
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Tag being released (e.g. "v1.3.0")
    pub current_tag: String,
    /// Bare version being released (e.g. "1.3.0")
    pub current_version: String,
    /// Previous release tag, if one exists
    pub previous_tag: Option<String>,
}

impl HookContext {
    /// Template variables for command substitution
    pub fn to_vars(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        vars.insert("currentTag", self.current_tag.clone());
        vars.insert("currentVersion", self.current_version.clone());
        if let Some(previous) = &self.previous_tag {
            vars.insert("previousTag", previous.clone());
        }
        vars
    }
}
