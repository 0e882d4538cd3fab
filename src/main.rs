use anyhow::Result;
use clap::Parser;

use relver::analyzer::ReleaseDecision;
use relver::config;
use relver::git::Git2Vcs;
use relver::hooks::ShellRunner;
use relver::orchestrator::ReleaseOrchestrator;
use relver::ui;

#[derive(clap::Parser)]
#[command(
    name = "relver",
    version,
    about = "Compute the next version from conventional commits, update files, changelog, commit and tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Tag the current version as the first release instead of bumping")]
    first_release: bool,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Do not update the changelog")]
    skip_changelog: bool,

    #[arg(long, help = "Do not create the release commit")]
    skip_commit: bool,

    #[arg(long, help = "Do not create the release tag")]
    skip_tag: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // CLI flags override configured skip behavior
    config.skip.changelog |= args.skip_changelog;
    config.skip.commit |= args.skip_commit;
    config.skip.tag |= args.skip_tag;

    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let vcs = match Git2Vcs::open(".") {
        Ok(vcs) => vcs,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let runner = ShellRunner;
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();

    // Preview first so the operator confirms against the actual plan
    let mut preview_orchestrator =
        ReleaseOrchestrator::new(&config, &vcs, &runner, ".", date.clone()).dry_run();
    if args.first_release {
        preview_orchestrator = preview_orchestrator.first_release();
    }
    let preview = preview_orchestrator.run()?;

    ui::display_commit_summary(&preview.commits);
    ui::display_run(&preview, true);

    if preview.is_noop() || args.dry_run {
        return Ok(());
    }

    if !args.force && !ui::confirm_action("Proceed with this release?")? {
        println!("Release cancelled by user.");
        return Ok(());
    }

    let mut orchestrator = ReleaseOrchestrator::new(&config, &vcs, &runner, ".", date);
    if args.first_release {
        orchestrator = orchestrator.first_release();
    }
    let run = orchestrator.run()?;

    ui::display_run(&run, false);
    let released = match run.decision {
        ReleaseDecision::Release { next, .. } => Some(next),
        ReleaseDecision::Initial { version } => Some(version),
        ReleaseDecision::NoRelease => None,
    };
    if let Some(version) = released {
        ui::display_success(&format!("Released {}{}", config.tag_prefix, version));
    }

    Ok(())
}
