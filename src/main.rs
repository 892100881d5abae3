use env_logger::{Builder, Env};
use std::path::PathBuf;
use structopt::StructOpt;

use relcut::config::RunOptions;
use relcut::git::GitRepo;
use relcut::input::InquireOperator;
use relcut::release::{ReleaseOrchestrator, ReleaseOutcome};

#[derive(StructOpt)]
#[structopt(
    name = env!("CARGO_PKG_NAME"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
struct Opt {
    #[structopt(
        long = "dry-run",
        help = "Report every step without writing files, committing, tagging or pushing"
    )]
    dry_run: bool,

    #[structopt(long = "version-file", help = "Path to the version file [default: version.txt]")]
    version_file: Option<PathBuf>,

    #[structopt(
        long = "changelog-file",
        help = "Path to the changelog file [default: changes.md]"
    )]
    changelog_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();

    let defaults = RunOptions::default();
    let options = RunOptions {
        file_version: opt.version_file.unwrap_or(defaults.file_version),
        file_changelog: opt.changelog_file.unwrap_or(defaults.file_changelog),
        dry_run: opt.dry_run,
    };

    let git = match GitRepo::discover() {
        Ok(git) => git,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let operator = InquireOperator;
    let orchestrator = ReleaseOrchestrator::new(&git, &operator, options);

    match orchestrator.run() {
        // Failed runs were already reported and recovered with a stash;
        // only the precondition check exits non-zero.
        Ok(ReleaseOutcome::Completed { .. }) | Ok(ReleaseOutcome::Failed { .. }) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
