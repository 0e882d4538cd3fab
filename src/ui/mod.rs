//! Operator-facing terminal output

use crate::analyzer::ReleaseDecision;
use crate::domain::{CommitRecord, CommitType};
use crate::error::Result;
use crate::orchestrator::{ReleaseRun, StepOutcome};
use console::style;
use std::io::{self, Write};

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Summarize classified commits by type before the run
pub fn display_commit_summary(commits: &[CommitRecord]) {
    println!("\n{}", style(format!("{} commits since last release", commits.len())).bold());

    let mut counted: Vec<(CommitType, usize)> = Vec::new();
    for commit in commits {
        match counted.iter_mut().find(|(t, _)| *t == commit.commit_type) {
            Some((_, n)) => *n += 1,
            None => counted.push((commit.commit_type, 1)),
        }
    }

    for (commit_type, count) in counted {
        println!("  {:>3}  {}", count, commit_type.token());
    }

    let breaking = commits.iter().filter(|c| c.breaking).count();
    if breaking > 0 {
        println!(
            "  {}",
            style(format!("{} breaking change(s)", breaking)).red()
        );
    }
}

/// Report the outcome of a finished (or dry) run
pub fn display_run(run: &ReleaseRun, dry_run: bool) {
    if run.is_noop() {
        display_status("No release needed: no feat, fix, perf or breaking commits");
        return;
    }

    match run.decision {
        ReleaseDecision::Release { bump, next } => {
            println!(
                "\n{}",
                style(format!("Release {:?} bump -> {}", bump, next)).bold()
            );
        }
        ReleaseDecision::Initial { version } => {
            println!(
                "\n{}",
                style(format!("Initial release {}", version)).bold()
            );
        }
        ReleaseDecision::NoRelease => {}
    }

    match (&run.previous_tag, &run.current_tag) {
        (Some(previous), Some(current)) => {
            println!("  From: {}", style(previous).red());
            println!("  To:   {}", style(current.to_string()).green());
        }
        (None, Some(current)) => {
            println!("  Initial tag: {}", style(current.to_string()).green());
        }
        _ => {}
    }

    for (state, outcome) in &run.steps {
        let label = match outcome {
            StepOutcome::Completed => style("done").green(),
            StepOutcome::Skipped => style("skipped").yellow(),
            StepOutcome::NoOp => style("no-op").yellow(),
        };
        println!("  {:<16} {}", state.name(), label);
    }

    if dry_run {
        if let Some(section) = &run.changelog {
            println!("\n{}", style("Changelog preview:").bold());
            print!("{}", section);
        }
    }
}

/// Ask for confirmation; defaults to no
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
