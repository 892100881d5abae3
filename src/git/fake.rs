use crate::error::CliError;
use crate::git::{CommitInfo, SourceControl};
use std::cell::RefCell;

/// Every mutating call a [FakeRepo] has seen, for test assertions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordedOps {
    pub stage_calls: u32,
    pub commits: Vec<String>,
    pub tags: Vec<String>,
    /// (remote, branch, tag) per push
    pub pushes: Vec<(String, String, String)>,
    pub stash_calls: u32,
}

/// In-memory [SourceControl] for exercising the release workflow without a
/// real repository.
pub struct FakeRepo {
    changed_files: Vec<String>,
    branch: String,
    latest_tag: Option<String>,
    commits: Vec<CommitInfo>,
    diff: String,
    remotes: Vec<String>,
    recorded: RefCell<RecordedOps>,
}

impl FakeRepo {
    pub fn new() -> Self {
        FakeRepo {
            changed_files: Vec::new(),
            branch: "main".to_string(),
            latest_tag: None,
            commits: Vec::new(),
            diff: String::new(),
            remotes: vec!["origin".to_string()],
            recorded: RefCell::new(RecordedOps::default()),
        }
    }

    pub fn with_changed_files(mut self, files: &[&str]) -> Self {
        self.changed_files = files.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    pub fn with_latest_tag(mut self, tag: &str) -> Self {
        self.latest_tag = Some(tag.to_string());
        self
    }

    pub fn with_commit(mut self, message: &str, seconds: i64) -> Self {
        self.commits.push(CommitInfo {
            message: message.to_string(),
            seconds,
        });
        self
    }

    pub fn with_diff(mut self, diff: &str) -> Self {
        self.diff = diff.to_string();
        self
    }

    pub fn with_remotes(mut self, remotes: &[&str]) -> Self {
        self.remotes = remotes.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn recorded(&self) -> RecordedOps {
        self.recorded.borrow().clone()
    }
}

impl Default for FakeRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceControl for FakeRepo {
    fn changed_files(&self) -> Result<Vec<String>, CliError> {
        Ok(self.changed_files.clone())
    }

    fn current_branch(&self) -> Result<String, CliError> {
        Ok(self.branch.clone())
    }

    fn latest_tag(&self) -> Result<Option<String>, CliError> {
        Ok(self.latest_tag.clone())
    }

    fn commits_since(&self, _tag: Option<&str>) -> Result<Vec<CommitInfo>, CliError> {
        Ok(self.commits.clone())
    }

    fn diff_summary(&self) -> Result<String, CliError> {
        Ok(self.diff.clone())
    }

    fn stage_all(&self) -> Result<(), CliError> {
        self.recorded.borrow_mut().stage_calls += 1;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<(), CliError> {
        self.recorded.borrow_mut().commits.push(message.to_string());
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<(), CliError> {
        self.recorded.borrow_mut().tags.push(name.to_string());
        Ok(())
    }

    fn stash_save(&self) -> Result<(), CliError> {
        self.recorded.borrow_mut().stash_calls += 1;
        Ok(())
    }

    fn list_remotes(&self) -> Result<Vec<String>, CliError> {
        Ok(self.remotes.clone())
    }

    fn push(&self, remote: &str, branch: &str, tag: &str) -> Result<(), CliError> {
        self.recorded.borrow_mut().pushes.push((
            remote.to_string(),
            branch.to_string(),
            tag.to_string(),
        ));
        Ok(())
    }
}
