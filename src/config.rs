use std::path::PathBuf;

pub const DEFAULT_VERSION_FILE: &str = "version.txt";
pub const DEFAULT_CHANGELOG_FILE: &str = "changes.md";

/// Options fixed for the duration of one release run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub file_version: PathBuf,
    pub file_changelog: PathBuf,
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            file_version: PathBuf::from(DEFAULT_VERSION_FILE),
            file_changelog: PathBuf::from(DEFAULT_CHANGELOG_FILE),
            dry_run: false,
        }
    }
}
