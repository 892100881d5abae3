mod fake;
mod repository;

pub use fake::{FakeRepo, RecordedOps};
pub use repository::GitRepo;

use crate::error::CliError;

/// One commit as seen by the release workflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitInfo {
    /// First line of the commit message
    pub message: String,
    /// Commit time as seconds since the Unix epoch
    pub seconds: i64,
}

/// Source-control operations the release workflow depends on.
///
/// The orchestrator only talks to this trait so tests can substitute
/// [FakeRepo] for the real [GitRepo].
pub trait SourceControl {
    /// Paths with index or workdir changes, untracked files included.
    fn changed_files(&self) -> Result<Vec<String>, CliError>;

    fn current_branch(&self) -> Result<String, CliError>;

    /// The most recent tag reachable from HEAD, if any.
    fn latest_tag(&self) -> Result<Option<String>, CliError>;

    /// Commits after `tag` up to HEAD, newest first. `None` walks the full
    /// history.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>, CliError>;

    /// Patch text of the release commit against its first parent.
    fn diff_summary(&self) -> Result<String, CliError>;

    fn stage_all(&self) -> Result<(), CliError>;

    fn commit(&self, message: &str) -> Result<(), CliError>;

    fn create_tag(&self, name: &str) -> Result<(), CliError>;

    /// Stash everything in the working tree, untracked files included.
    /// A clean tree is not an error.
    fn stash_save(&self) -> Result<(), CliError>;

    fn list_remotes(&self) -> Result<Vec<String>, CliError>;

    /// Push a branch together with one tag to a remote.
    fn push(&self, remote: &str, branch: &str, tag: &str) -> Result<(), CliError>;
}
