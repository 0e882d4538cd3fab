//! Release lifecycle orchestration
//!
//! Sequences one release end to end: resolve the next version, run the
//! bump-file writes inside their hook pair, render the changelog,
//! commit and tag. Skip flags leave steps out (together with their
//! hooks); a no-release decision ends the run cleanly before any file
//! is touched. Failures halt the remaining steps and carry the
//! lifecycle state they occurred in.

use crate::analyzer::{ReleaseDecision, VersionResolver};
use crate::bump::{atomic_write, BumpFileEditor};
use crate::changelog::{update_document, ChangelogRenderer, ReleaseContext};
use crate::config::Config;
use crate::domain::{classify, CommitRecord, VersionTag};
use crate::error::{ReleaseError, Result};
use crate::git::Vcs;
use crate::hooks::{CommandRunner, HookContext, HookExecutor, HookSlot};
use crate::template;
use std::fs;
use std::path::PathBuf;

/// Changelog document maintained at the project root
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Lifecycle states, in strict order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Start,
    ResolveVersion,
    Bump,
    RenderChangelog,
    GitCommit,
    GitTag,
    Done,
    Failed,
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Start => "Start",
            LifecycleState::ResolveVersion => "ResolveVersion",
            LifecycleState::Bump => "Bump",
            LifecycleState::RenderChangelog => "RenderChangelog",
            LifecycleState::GitCommit => "GitCommit",
            LifecycleState::GitTag => "GitTag",
            LifecycleState::Done => "Done",
            LifecycleState::Failed => "Failed",
        }
    }
}

/// How one lifecycle step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped,
    NoOp,
}

/// Transient record of one release run
#[derive(Debug)]
pub struct ReleaseRun {
    pub commits: Vec<CommitRecord>,
    pub decision: ReleaseDecision,
    pub previous_tag: Option<String>,
    pub current_tag: Option<VersionTag>,
    /// Rendered changelog section for this release
    pub changelog: Option<String>,
    pub steps: Vec<(LifecycleState, StepOutcome)>,
}

impl ReleaseRun {
    /// Whether the run ended without producing a release
    pub fn is_noop(&self) -> bool {
        self.decision == ReleaseDecision::NoRelease
    }
}

/// Sequences the full release lifecycle
pub struct ReleaseOrchestrator<'a> {
    config: &'a Config,
    vcs: &'a dyn Vcs,
    runner: &'a dyn CommandRunner,
    root: PathBuf,
    /// Release date stamped into the changelog header (YYYY-MM-DD)
    date: String,
    dry_run: bool,
    first_release: bool,
}

impl<'a> ReleaseOrchestrator<'a> {
    pub fn new(
        config: &'a Config,
        vcs: &'a dyn Vcs,
        runner: &'a dyn CommandRunner,
        root: impl Into<PathBuf>,
        date: impl Into<String>,
    ) -> Self {
        ReleaseOrchestrator {
            config,
            vcs,
            runner,
            root: root.into(),
            date: date.into(),
            dry_run: false,
            first_release: false,
        }
    }

    /// Report what the run would do without mutating anything
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Publish the current version as-is instead of computing a bump.
    ///
    /// The version source is only read; the Bump step and its hook pair
    /// are skipped, and the changelog, commit and tag use the version
    /// already in the file.
    pub fn first_release(mut self) -> Self {
        self.first_release = true;
        self
    }

    /// Execute one release run.
    ///
    /// Transition order: ResolveVersion, [prebump] Bump [postbump],
    /// RenderChangelog, [precommit] GitCommit [postcommit],
    /// [pretag] GitTag [posttag]. Hook failures are attributed to the
    /// step the hook surrounds.
    pub fn run(&self) -> Result<ReleaseRun> {
        let mut steps = vec![(LifecycleState::Start, StepOutcome::Completed)];

        // ResolveVersion
        let editor = BumpFileEditor::new(&self.root);
        let version_source = self.config.package_files.first().ok_or_else(|| {
            ReleaseError::at_step(
                LifecycleState::ResolveVersion.name(),
                ReleaseError::config("No package file configured as version source"),
            )
        })?;
        let current = editor
            .read_version(version_source)
            .map_err(|e| ReleaseError::at_step(LifecycleState::ResolveVersion.name(), e))?;

        let previous_tag = self
            .vcs
            .find_latest_version_tag(&self.config.tag_prefix)
            .map_err(|e| ReleaseError::at_step(LifecycleState::ResolveVersion.name(), e))?;

        let entries = self
            .vcs
            .commits_since(previous_tag.as_deref())
            .map_err(|e| ReleaseError::at_step(LifecycleState::ResolveVersion.name(), e))?;
        let raw: Vec<(String, String)> = entries
            .into_iter()
            .map(|e| (e.hash, e.message))
            .collect();
        let commits = classify(&raw);

        let (decision, next) = if self.first_release {
            (ReleaseDecision::Initial { version: current }, current)
        } else {
            let resolver = VersionResolver::new(self.config.pre_major_policy);
            let decision = resolver.resolve(current, &commits);

            let next = match decision {
                ReleaseDecision::NoRelease => {
                    steps.push((LifecycleState::ResolveVersion, StepOutcome::NoOp));
                    steps.push((LifecycleState::Done, StepOutcome::Completed));
                    return Ok(ReleaseRun {
                        commits,
                        decision,
                        previous_tag,
                        current_tag: None,
                        changelog: None,
                        steps,
                    });
                }
                ReleaseDecision::Release { next, .. } => next,
                ReleaseDecision::Initial { version } => version,
            };
            (decision, next)
        };
        steps.push((LifecycleState::ResolveVersion, StepOutcome::Completed));

        let current_tag = VersionTag::new(next, self.config.tag_prefix.clone());
        let hook_ctx = HookContext {
            current_tag: current_tag.to_string(),
            current_version: next.to_string(),
            previous_tag: previous_tag.clone(),
        };
        let hooks = HookExecutor::new(self.runner, &self.config.scripts);

        // Bump, wrapped in prebump/postbump. A first release keeps the
        // version already in the files.
        if self.first_release || self.dry_run {
            steps.push((LifecycleState::Bump, StepOutcome::Skipped));
        } else {
            self.run_hook(&hooks, HookSlot::Prebump, &hook_ctx, LifecycleState::Bump)?;

            editor
                .write_all(&self.config.all_bump_files(), &next)
                .map_err(|e| ReleaseError::at_step(LifecycleState::Bump.name(), e))?;

            self.run_hook(&hooks, HookSlot::Postbump, &hook_ctx, LifecycleState::Bump)?;
            steps.push((LifecycleState::Bump, StepOutcome::Completed));
        }

        // RenderChangelog
        let renderer = ChangelogRenderer::new(self.config.types.clone(), self.config.urls.clone());
        let section = renderer.render(
            &commits,
            &ReleaseContext {
                current_tag: current_tag.clone(),
                previous_tag: previous_tag.clone(),
                date: self.date.clone(),
            },
        );

        let mut changelog_written = false;
        if self.config.skip.changelog {
            steps.push((LifecycleState::RenderChangelog, StepOutcome::Skipped));
        } else if self.dry_run {
            steps.push((LifecycleState::RenderChangelog, StepOutcome::Skipped));
        } else {
            self.write_changelog(&section)
                .map_err(|e| ReleaseError::at_step(LifecycleState::RenderChangelog.name(), e))?;
            changelog_written = true;
            steps.push((LifecycleState::RenderChangelog, StepOutcome::Completed));
        }

        let message = template::render(
            &self.config.release_commit_message_format,
            &hook_ctx.to_vars(),
        );

        // GitCommit, wrapped in precommit/postcommit
        if self.config.skip.commit || self.dry_run {
            steps.push((LifecycleState::GitCommit, StepOutcome::Skipped));
        } else {
            self.run_hook(&hooks, HookSlot::Precommit, &hook_ctx, LifecycleState::GitCommit)?;

            let mut paths: Vec<PathBuf> = self
                .config
                .all_bump_files()
                .iter()
                .map(|spec| PathBuf::from(&spec.filename))
                .collect();
            if changelog_written {
                paths.push(PathBuf::from(CHANGELOG_FILE));
            }

            self.vcs
                .commit(&message, &paths)
                .map_err(|e| ReleaseError::at_step(LifecycleState::GitCommit.name(), e))?;

            self.run_hook(&hooks, HookSlot::Postcommit, &hook_ctx, LifecycleState::GitCommit)?;
            steps.push((LifecycleState::GitCommit, StepOutcome::Completed));
        }

        // GitTag, wrapped in pretag/posttag
        if self.config.skip.tag || self.dry_run {
            steps.push((LifecycleState::GitTag, StepOutcome::Skipped));
        } else {
            self.run_hook(&hooks, HookSlot::Pretag, &hook_ctx, LifecycleState::GitTag)?;

            self.vcs
                .tag(&current_tag.to_string(), &message)
                .map_err(|e| ReleaseError::at_step(LifecycleState::GitTag.name(), e))?;

            self.run_hook(&hooks, HookSlot::Posttag, &hook_ctx, LifecycleState::GitTag)?;
            steps.push((LifecycleState::GitTag, StepOutcome::Completed));
        }

        steps.push((LifecycleState::Done, StepOutcome::Completed));

        Ok(ReleaseRun {
            commits,
            decision,
            previous_tag,
            current_tag: Some(current_tag),
            changelog: Some(section),
            steps,
        })
    }

    fn run_hook(
        &self,
        hooks: &HookExecutor<'_>,
        slot: HookSlot,
        ctx: &HookContext,
        state: LifecycleState,
    ) -> Result<()> {
        hooks
            .run_slot(slot, ctx)
            .map(|_| ())
            .map_err(|e| ReleaseError::at_step(state.name(), e))
    }

    /// Prepend the rendered section to the changelog document
    fn write_changelog(&self, section: &str) -> Result<()> {
        let path = self.root.join(CHANGELOG_FILE);
        let existing = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };

        let doc = update_document(&existing, &self.config.header, section);
        atomic_write(&path, &doc)
    }
}
