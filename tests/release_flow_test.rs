// tests/release_flow_test.rs
//
// End-to-end runs over the mock VCS and a recording command runner:
// no real repository, no real shell.

use relver::analyzer::ReleaseDecision;
use relver::config::Config;
use relver::domain::Version;
use relver::git::MockVcs;
use relver::hooks::{CommandOutput, CommandRunner};
use relver::orchestrator::ReleaseOrchestrator;
use relver::Result;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

/// Records every command; fails any command containing `fail_on`
struct RecordingRunner {
    commands: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    fn new() -> Self {
        RecordingRunner {
            commands: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    fn failing_on(substring: &str) -> Self {
        RecordingRunner {
            commands: Mutex::new(Vec::new()),
            fail_on: Some(substring.to_string()),
        }
    }

    fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        self.commands.lock().unwrap().push(command.to_string());

        let code = match &self.fail_on {
            Some(needle) if command.contains(needle) => 1,
            _ => 0,
        };

        Ok(CommandOutput {
            code,
            stdout: String::new(),
            stderr: if code != 0 {
                "scripted failure".to_string()
            } else {
                String::new()
            },
        })
    }
}

fn project(version: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        format!(r#"{{ "name": "demo", "version": "{}" }}"#, version),
    )
    .unwrap();
    dir
}

fn config_with_urls() -> Config {
    let mut config = Config::default();
    config.urls.commit_url_format = Some("https://example.com/commit/{{hash}}".to_string());
    config.urls.compare_url_format =
        Some("https://example.com/compare/{{previousTag}}...{{currentTag}}".to_string());
    config
}

#[test]
fn test_feat_and_fix_release_minor() {
    let dir = project("1.2.3");
    let config = config_with_urls();
    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X"), ("bbbb222", "fix: correct Y")]);
    let runner = RecordingRunner::new();

    let run = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    assert_eq!(
        run.decision,
        ReleaseDecision::Release {
            bump: relver::domain::VersionBump::Minor,
            next: Version::new(1, 3, 0),
        }
    );
    assert_eq!(run.current_tag.as_ref().unwrap().to_string(), "v1.3.0");

    // Bump file rewritten
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains(r#""version": "1.3.0""#));

    // Changelog written with sections in mapping order
    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    let features = changelog.find("### ✨ Features").unwrap();
    let fixes = changelog.find("### 🐛 Bug Fixes").unwrap();
    assert!(features < fixes);
    assert!(changelog.contains("add X"));
    assert!(changelog.contains("correct Y"));

    // Release commit carries the CI-skip marker and stages the changelog
    let commits = vcs.issued_commits();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].0, "chore(release): v1.3.0 [skip ci]");
    assert!(commits[0]
        .1
        .iter()
        .any(|p| p.to_str() == Some("CHANGELOG.md")));

    assert_eq!(vcs.issued_tags()[0].0, "v1.3.0");
}

#[test]
fn test_breaking_fix_releases_major() {
    let dir = project("1.2.3");
    let config = Config::default();
    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "fix!: remove Z")]);
    let runner = RecordingRunner::new();

    let run = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    assert_eq!(run.current_tag.as_ref().unwrap().to_string(), "v2.0.0");
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("2.0.0"));
}

#[test]
fn test_quiet_commits_end_as_noop() {
    let dir = project("1.2.3");
    let config = Config::default();
    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "docs: readme"), ("bbbb222", "chore: deps")]);
    let runner = RecordingRunner::new();

    let run = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    assert!(run.is_noop());
    assert!(run.current_tag.is_none());

    // Nothing touched: no file writes, no hooks, no VCS operations
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("1.2.3"));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert!(runner.commands().is_empty());
    assert!(vcs.issued_commits().is_empty());
    assert!(vcs.issued_tags().is_empty());
}

#[test]
fn test_skip_tag_commits_but_never_tags() {
    let dir = project("1.2.3");
    let mut config = Config::default();
    config.skip.tag = true;
    config
        .scripts
        .insert("pretag".to_string(), "echo pretag".to_string());
    config
        .scripts
        .insert("posttag".to_string(), "echo posttag".to_string());

    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X")]);
    let runner = RecordingRunner::new();

    ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    assert_eq!(vcs.issued_commits().len(), 1);
    assert!(vcs.issued_tags().is_empty());

    // Skipping the step skips its hook pair too
    let commands = runner.commands();
    assert!(!commands.iter().any(|c| c.contains("pretag")));
    assert!(!commands.iter().any(|c| c.contains("posttag")));
}

#[test]
fn test_skip_changelog_leaves_document_untouched() {
    let dir = project("1.2.3");
    let mut config = Config::default();
    config.skip.changelog = true;

    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X")]);
    let runner = RecordingRunner::new();

    let run = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    assert!(!dir.path().join("CHANGELOG.md").exists());
    // The release itself still happens
    assert_eq!(run.current_tag.as_ref().unwrap().to_string(), "v1.3.0");
    assert_eq!(vcs.issued_tags().len(), 1);
}

#[test]
fn test_precommit_failure_halts_before_commit_and_tag() {
    let dir = project("1.2.3");
    let mut config = Config::default();
    config
        .scripts
        .insert("precommit".to_string(), "run-lint".to_string());

    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X")]);
    let runner = RecordingRunner::failing_on("run-lint");

    let err = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("GitCommit"));
    assert!(msg.contains("precommit"));

    assert!(vcs.issued_commits().is_empty());
    assert!(vcs.issued_tags().is_empty());
}

#[test]
fn test_tag_failure_reports_gittag_state_and_keeps_commit() {
    let dir = project("1.2.3");
    let config = Config::default();
    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X")])
        .failing_tag("tag already exists");
    let runner = RecordingRunner::new();

    let err = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("GitTag"));
    assert!(msg.contains("tag already exists"));

    // The commit stands; no rollback past the bump-file boundary
    assert_eq!(vcs.issued_commits().len(), 1);
}

#[test]
fn test_hooks_run_in_lifecycle_order_with_substitution() {
    let dir = project("1.2.3");
    let mut config = Config::default();
    for (slot, command) in [
        ("prebump", "echo prebump"),
        ("postbump", "echo postbump"),
        ("precommit", "echo precommit"),
        ("postcommit", "echo postcommit"),
        ("pretag", "echo pretag {{currentTag}}"),
        ("posttag", "echo posttag {{currentTag}}"),
    ] {
        config.scripts.insert(slot.to_string(), command.to_string());
    }

    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X")]);
    let runner = RecordingRunner::new();

    ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec![
            "echo prebump".to_string(),
            "echo postbump".to_string(),
            "echo precommit".to_string(),
            "echo postcommit".to_string(),
            "echo pretag v1.3.0".to_string(),
            "echo posttag v1.3.0".to_string(),
        ]
    );
}

#[test]
fn test_dry_run_mutates_nothing_but_reports_plan() {
    let dir = project("1.2.3");
    let config = config_with_urls();
    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X")]);
    let runner = RecordingRunner::new();

    let run = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .dry_run()
        .run()
        .unwrap();

    assert_eq!(run.current_tag.as_ref().unwrap().to_string(), "v1.3.0");
    assert!(run.changelog.as_ref().unwrap().contains("add X"));

    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("1.2.3"));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert!(runner.commands().is_empty());
    assert!(vcs.issued_commits().is_empty());
    assert!(vcs.issued_tags().is_empty());
}

#[test]
fn test_consecutive_releases_accumulate_changelog() {
    let dir = project("1.2.3");
    let config = Config::default();
    let runner = RecordingRunner::new();

    let vcs = MockVcs::new()
        .with_latest_tag("v1.2.3")
        .with_log(vec![("aaaa111", "feat: add X")]);
    ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-01")
        .run()
        .unwrap();

    let vcs = MockVcs::new()
        .with_latest_tag("v1.3.0")
        .with_log(vec![("cccc333", "fix: correct Y")]);
    ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert_eq!(changelog.matches("# Changelog").count(), 1);

    let newer = changelog.find("## 1.3.1").unwrap();
    let older = changelog.find("## 1.3.0").unwrap();
    assert!(newer < older);
}

#[test]
fn test_first_release_tags_current_version_without_bump() {
    let dir = project("1.0.0");
    let mut config = Config::default();
    config
        .scripts
        .insert("prebump".to_string(), "echo prebump".to_string());
    config
        .scripts
        .insert("postbump".to_string(), "echo postbump".to_string());

    let vcs = MockVcs::new().with_log(vec![("aaaa111", "feat: initial import")]);
    let runner = RecordingRunner::new();

    let run = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .first_release()
        .run()
        .unwrap();

    assert_eq!(
        run.decision,
        ReleaseDecision::Initial {
            version: Version::new(1, 0, 0),
        }
    );
    assert_eq!(run.current_tag.as_ref().unwrap().to_string(), "v1.0.0");

    // The version source is only read, never rewritten
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains(r#""version": "1.0.0""#));

    // Skipping the bump skips its hook pair
    let commands = runner.commands();
    assert!(!commands.iter().any(|c| c.contains("prebump")));
    assert!(!commands.iter().any(|c| c.contains("postbump")));

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.contains("## 1.0.0 (2026-08-30)"));
    assert!(changelog.contains("initial import"));

    assert_eq!(vcs.issued_commits()[0].0, "chore(release): v1.0.0 [skip ci]");
    assert_eq!(vcs.issued_tags()[0].0, "v1.0.0");
}

#[test]
fn test_first_release_without_previous_tag() {
    let dir = project("0.1.0");
    let config = Config::default();
    let vcs = MockVcs::new().with_log(vec![("aaaa111", "feat: first feature")]);
    let runner = RecordingRunner::new();

    let run = ReleaseOrchestrator::new(&config, &vcs, &runner, dir.path(), "2026-08-30")
        .run()
        .unwrap();

    assert_eq!(run.previous_tag, None);
    assert_eq!(run.current_tag.as_ref().unwrap().to_string(), "v0.2.0");

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.contains("## 0.2.0 (2026-08-30)"));
}
