mod notes;

pub use notes::build_release_note;

use crate::changelog::Changelog;
use crate::config::RunOptions;
use crate::error::CliError;
use crate::git::SourceControl;
use crate::input::Operator;
use crate::logger;
use crate::version::{candidates, parse_version};
use log::{debug, info};

/// Terminal state of one release run.
#[derive(Debug)]
pub enum ReleaseOutcome {
    Completed {
        version: String,
    },
    /// A step failed after the precondition check; the error was reported and
    /// `recovered` says whether the auto-stash went through.
    Failed {
        error: CliError,
        recovered: bool,
    },
}

/// Runs the release workflow end to end: check the working tree, pick the
/// next version, synthesize and edit the changelog entry, write both files,
/// commit, tag and push.
pub struct ReleaseOrchestrator<'a, G: SourceControl, O: Operator> {
    git: &'a G,
    operator: &'a O,
    options: RunOptions,
}

impl<'a, G: SourceControl, O: Operator> ReleaseOrchestrator<'a, G, O> {
    pub fn new(git: &'a G, operator: &'a O, options: RunOptions) -> Self {
        ReleaseOrchestrator {
            git,
            operator,
            options,
        }
    }

    /// Run the full workflow.
    ///
    /// A dirty working tree outside dry-run is returned as `Err` so the
    /// caller can exit non-zero; every later failure is caught here, answered
    /// with the auto-stash recovery and folded into [ReleaseOutcome::Failed].
    pub fn run(&self) -> Result<ReleaseOutcome, CliError> {
        info!("🚀 Starting release run");
        self.check_working_tree()?;

        match self.create() {
            Ok(version) => {
                logger::success(&format!("Released version {}", version));
                Ok(ReleaseOutcome::Completed { version })
            }
            Err(error) => {
                logger::error(&format!("Release failed: {}", error));
                let recovered = self.recover();
                Ok(ReleaseOutcome::Failed { error, recovered })
            }
        }
    }

    fn check_working_tree(&self) -> Result<(), CliError> {
        let changed = self.git.changed_files()?;
        if changed.is_empty() {
            debug!("Working tree clean");
            return Ok(());
        }
        if self.options.dry_run {
            logger::warning(&format!(
                "Dry run: {} uncommitted file(s) would abort the release",
                changed.len()
            ));
            return Ok(());
        }
        Err(CliError::UncommittedChanges(changed.len()))
    }

    fn create(&self) -> Result<String, CliError> {
        let current = self.load_current_version()?;
        info!("📌 Current version: {}", current);

        let new_version = self.select_next_version(&current)?;
        info!("🆕 Selected version: {}", new_version);

        let note = self.build_note(&new_version)?;
        let note = self.operator.edit_text("Release note", &note)?;

        self.merge_changelog(&note)?;
        self.save_version(&new_version)?;
        self.commit_and_tag(&new_version)?;
        self.push(&new_version)?;

        Ok(new_version)
    }

    fn load_current_version(&self) -> Result<String, CliError> {
        let path = &self.options.file_version;
        let content = std::fs::read_to_string(path).map_err(|source| {
            CliError::VersionFileRead {
                path: path.display().to_string(),
                source,
            }
        })?;
        Ok(content.trim().to_string())
    }

    fn select_next_version(&self, current: &str) -> Result<String, CliError> {
        let current = parse_version(current)?;
        let proposals = candidates(&current);
        let labels: Vec<String> = proposals
            .iter()
            .map(|(bump, version)| format!("{} ({})", bump, version))
            .collect();

        let picked = self.operator.choose("Select the next version", &labels)?;
        let index = labels
            .iter()
            .position(|label| label == &picked)
            .ok_or_else(|| CliError::InputError(format!("unknown selection '{}'", picked)))?;

        Ok(proposals[index].1.to_string())
    }

    fn build_note(&self, version: &str) -> Result<String, CliError> {
        let latest_tag = self.git.latest_tag()?;
        match &latest_tag {
            Some(tag) => logger::progress(&format!("Collecting commits since tag {}", tag)),
            None => logger::progress("No tag found, collecting the full commit history"),
        }
        let commits = self.git.commits_since(latest_tag.as_deref())?;
        info!("📋 {} commit(s) in this release", commits.len());
        Ok(build_release_note(version, &commits))
    }

    fn merge_changelog(&self, note: &str) -> Result<(), CliError> {
        let (mut changelog, original) = Changelog::load(&self.options.file_changelog)?;
        if self.options.dry_run {
            logger::info("Dry run: changelog before merge (first 1000 characters):");
            println!("{}", original.chars().take(1000).collect::<String>());
            return Ok(());
        }
        changelog.insert_entry(note);
        changelog.save(&self.options.file_changelog)?;
        logger::success("Changelog updated");
        Ok(())
    }

    fn save_version(&self, version: &str) -> Result<(), CliError> {
        if self.options.dry_run {
            logger::info(&format!("Dry run: would save version {}", version));
            return Ok(());
        }
        std::fs::write(&self.options.file_version, version)?;
        logger::success(&format!("Version file set to {}", version));
        Ok(())
    }

    fn commit_and_tag(&self, version: &str) -> Result<(), CliError> {
        let message = format!("version {}", version);
        if self.options.dry_run {
            logger::info(&format!(
                "Dry run: would commit '{}' and tag {}",
                message, version
            ));
            return Ok(());
        }
        self.git.stage_all()?;
        self.git.commit(&message)?;
        self.git.create_tag(version)?;
        logger::success(&format!("Committed and tagged {}", version));
        Ok(())
    }

    fn push(&self, version: &str) -> Result<(), CliError> {
        let branch = self.git.current_branch()?;
        let remotes = self.git.list_remotes()?;
        if remotes.is_empty() {
            return Err(CliError::NoRemotes);
        }

        let preselected: Vec<usize> = (0..remotes.len()).collect();
        let selected = self
            .operator
            .choose_many("Select remotes to push to", &remotes, &preselected)?;

        println!("{}", self.git.diff_summary()?);

        let confirmed = self.operator.confirm(
            &format!("Push {} to {} remote(s)?", version, selected.len()),
            true,
        )?;
        if !confirmed {
            return Err(CliError::PushCancelled);
        }

        for remote in &selected {
            if self.options.dry_run {
                logger::info(&format!(
                    "Dry run: would push {} and tag {} to {}",
                    branch, version, remote
                ));
            } else {
                self.git.push(remote, &branch, version)?;
                logger::success(&format!("Pushed {} and tag {} to {}", branch, version, remote));
            }
        }

        Ok(())
    }

    fn recover(&self) -> bool {
        if self.options.dry_run {
            logger::info("Dry run: skipping auto-stash of the working tree");
            return false;
        }
        match self.git.stash_save() {
            Ok(()) => {
                logger::warning("Stashed uncommitted working-tree changes");
                true
            }
            Err(e) => {
                logger::error(&format!("Auto-stash failed: {}", e));
                false
            }
        }
    }
}
