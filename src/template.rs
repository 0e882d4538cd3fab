//! Shared `{{placeholder}}` substitution
//!
//! One renderer serves every templated surface: changelog URL formats,
//! the release commit message format, tag messages and hook commands.
//! Unknown placeholders are left in place because a hook command may
//! carry `{{...}}` tokens meant for a downstream tool.

use std::collections::HashMap;

/// Substitute `{{name}}` placeholders in a template.
///
/// # Arguments
/// * `template` - Template string containing `{{name}}` tokens
/// * `vars` - Placeholder name to replacement value
pub fn render(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{{{}}}}}", name), value);
    }
    out
}

/// Check whether a template contains a given `{{name}}` placeholder.
pub fn has_placeholder(template: &str, name: &str) -> bool {
    template.contains(&format!("{{{{{}}}}}", name))
}

/// Build a single-placeholder variable map.
///
/// Most call sites substitute exactly one placeholder (e.g. `{{hash}}`
/// in a commit URL), so this keeps them short.
pub fn single(name: &'static str, value: impl Into<String>) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    vars.insert(name, value.into());
    vars
}
