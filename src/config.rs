use crate::domain::CommitType;
use crate::error::{ReleaseError, Result};
use crate::template;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Hook slot names recognized in the `scripts` table
pub const HOOK_SLOTS: [&str; 6] = [
    "prebump",
    "postbump",
    "precommit",
    "postcommit",
    "pretag",
    "posttag",
];

/// Commit-message tokens that stop CI from re-triggering on the release commit
pub const CI_SKIP_MARKERS: [&str; 2] = ["[skip ci]", "[ci skip]"];

/// Represents the complete configuration for relver.
///
/// One versioned schema covering changelog sections, URL formats, bump
/// files, lifecycle scripts and skip flags. [Config::validate] is the
/// single gate every run passes through before touching the repository.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Named convention supplying the section mapping when `types` is
    /// not set explicitly. Only "conventionalcommits" is built in.
    #[serde(default)]
    pub preset: Option<String>,

    #[serde(default = "default_types")]
    pub types: Vec<SectionEntry>,

    #[serde(default)]
    pub urls: UrlFormats,

    #[serde(default = "default_release_commit_message_format")]
    pub release_commit_message_format: String,

    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default)]
    pub pre_major_policy: PreMajorPolicy,

    #[serde(default = "default_package_files")]
    pub package_files: Vec<BumpFileSpec>,

    #[serde(default)]
    pub bump_files: Vec<BumpFileSpec>,

    #[serde(default)]
    pub scripts: HashMap<String, String>,

    #[serde(default)]
    pub skip: SkipFlags,
}

/// One changelog section mapping: commit type, title, visibility
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SectionEntry {
    pub r#type: String,

    #[serde(default)]
    pub section: String,

    #[serde(default)]
    pub hidden: bool,
}

/// URL templates for changelog links
///
/// Placeholders: `{{hash}}`, `{{previousTag}}`, `{{currentTag}}`,
/// `{{id}}`, `{{user}}`. Absent formats simply omit the link.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct UrlFormats {
    #[serde(default)]
    pub commit_url_format: Option<String>,

    #[serde(default)]
    pub compare_url_format: Option<String>,

    #[serde(default)]
    pub issue_url_format: Option<String>,

    #[serde(default)]
    pub user_url_format: Option<String>,
}

/// A file whose version field gets rewritten on release
///
/// `format` is a raw token ("json", "plain", or anything else) resolved
/// by the bump editor; unknown tokens fail there as unsupported.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpFileSpec {
    pub filename: String,

    #[serde(default = "default_format")]
    pub format: String,

    /// Locator pattern for the "plain" format; must carry exactly one
    /// capture group marking the version value.
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Lifecycle steps the orchestrator may leave out
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct SkipFlags {
    #[serde(default)]
    pub changelog: bool,

    #[serde(default)]
    pub commit: bool,

    #[serde(default)]
    pub tag: bool,
}

/// How breaking changes bump versions below 1.0.0
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreMajorPolicy {
    /// Same precedence rules at any version
    #[default]
    Uniform,
    /// While major == 0: breaking bumps minor, everything else patch
    Capped,
}

fn default_format() -> String {
    "json".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_release_commit_message_format() -> String {
    "chore(release): {{currentTag}} [skip ci]".to_string()
}

fn default_header() -> String {
    "# Changelog\n\nAll notable changes to this project will be documented in this file.\n"
        .to_string()
}

fn default_package_files() -> Vec<BumpFileSpec> {
    vec![BumpFileSpec {
        filename: "package.json".to_string(),
        format: "json".to_string(),
        pattern: None,
    }]
}

/// Returns the default changelog section mapping.
///
/// Display order matches the conventional-commits preset; chore is
/// mapped but hidden.
fn default_types() -> Vec<SectionEntry> {
    let visible = [
        ("feat", "✨ Features"),
        ("fix", "🐛 Bug Fixes"),
        ("perf", "⚡ Performance Improvements"),
        ("deps", "📦 Dependencies"),
        ("revert", "⏪ Reverts"),
        ("test", "✅ Tests"),
        ("ci", "🤖 Continuous Integration"),
        ("build", "🏗️ Build System"),
        ("refactor", "♻️ Code Refactoring"),
        ("docs", "📝 Documentation"),
        ("style", "🎨 Code Style"),
    ];

    let mut types: Vec<SectionEntry> = visible
        .iter()
        .map(|(t, s)| SectionEntry {
            r#type: t.to_string(),
            section: s.to_string(),
            hidden: false,
        })
        .collect();

    types.push(SectionEntry {
        r#type: "chore".to_string(),
        section: String::new(),
        hidden: true,
    });

    types
}

impl Default for Config {
    fn default() -> Self {
        Config {
            preset: None,
            types: default_types(),
            urls: UrlFormats::default(),
            release_commit_message_format: default_release_commit_message_format(),
            header: default_header(),
            tag_prefix: default_tag_prefix(),
            pre_major_policy: PreMajorPolicy::default(),
            package_files: default_package_files(),
            bump_files: Vec::new(),
            scripts: HashMap::new(),
            skip: SkipFlags::default(),
        }
    }
}

impl Config {
    /// Every file the release rewrites, package files first.
    ///
    /// The first package file is also the designated version source.
    pub fn all_bump_files(&self) -> Vec<BumpFileSpec> {
        self.package_files
            .iter()
            .chain(self.bump_files.iter())
            .cloned()
            .collect()
    }

    /// Validate the configuration before a run starts.
    ///
    /// Rejects unknown hook names, a release commit message without the
    /// `{{currentTag}}` placeholder or a CI-skip marker, duplicate or
    /// unknown type mappings, plain bump patterns without exactly one
    /// capture group, and an empty package file list.
    pub fn validate(&self) -> Result<()> {
        if let Some(preset) = &self.preset {
            if preset != "conventionalcommits" {
                return Err(ReleaseError::config(format!(
                    "Unknown preset '{}' - only 'conventionalcommits' is built in",
                    preset
                )));
            }
        }

        for name in self.scripts.keys() {
            if !HOOK_SLOTS.contains(&name.as_str()) {
                return Err(ReleaseError::config(format!(
                    "Unknown hook name '{}' in [scripts] - expected one of: {}",
                    name,
                    HOOK_SLOTS.join(", ")
                )));
            }
        }

        if !template::has_placeholder(&self.release_commit_message_format, "currentTag") {
            return Err(ReleaseError::config(
                "release_commit_message_format must contain the {{currentTag}} placeholder",
            ));
        }

        if !CI_SKIP_MARKERS
            .iter()
            .any(|m| self.release_commit_message_format.contains(m))
        {
            return Err(ReleaseError::config(format!(
                "release_commit_message_format must embed a CI-skip marker ({}) \
                 to keep the release commit from re-triggering automation",
                CI_SKIP_MARKERS.join(" or ")
            )));
        }

        let mut seen = Vec::new();
        for entry in &self.types {
            if CommitType::from_token(&entry.r#type) == CommitType::Other
                && entry.r#type != "other"
            {
                return Err(ReleaseError::config(format!(
                    "Unknown commit type '{}' in types mapping",
                    entry.r#type
                )));
            }
            if seen.contains(&entry.r#type) {
                return Err(ReleaseError::config(format!(
                    "Commit type '{}' mapped more than once",
                    entry.r#type
                )));
            }
            if !entry.hidden && entry.section.is_empty() {
                return Err(ReleaseError::config(format!(
                    "Visible commit type '{}' has no section title",
                    entry.r#type
                )));
            }
            seen.push(entry.r#type.clone());
        }

        if self.package_files.is_empty() {
            return Err(ReleaseError::config(
                "At least one package file is required as the version source",
            ));
        }

        for spec in self.all_bump_files() {
            if spec.format == "plain" {
                let pattern = spec.pattern.as_deref().ok_or_else(|| {
                    ReleaseError::config(format!(
                        "Bump file '{}' uses plain format but has no pattern",
                        spec.filename
                    ))
                })?;
                let re = regex::Regex::new(pattern).map_err(|e| {
                    ReleaseError::config(format!(
                        "Invalid pattern for bump file '{}': {}",
                        spec.filename, e
                    ))
                })?;
                // captures_len counts the implicit whole-match group
                if re.captures_len() != 2 {
                    return Err(ReleaseError::config(format!(
                        "Pattern for bump file '{}' must have exactly one capture group",
                        spec.filename
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relver.toml` in current directory
/// 3. `~/.config/.relver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./relver.toml").exists() {
        fs::read_to_string("./relver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".relver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))?;
    Ok(config)
}
