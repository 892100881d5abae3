use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Git error: {0}")]
    GitError(#[from] git2::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("{0} uncommitted file(s) in the working tree, commit or stash them first")]
    UncommittedChanges(usize),

    #[error("Could not read version file '{path}': {source}")]
    VersionFileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Could not read changelog file '{path}': {source}")]
    ChangelogFileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid semantic version '{0}': {1}")]
    InvalidVersion(String, String),

    #[error("Changelog has no blank line after its title block")]
    ChangelogFormat,

    #[error("No remotes configured, nothing to push to")]
    NoRemotes,

    #[error("Push cancelled")]
    PushCancelled,
}
