use crate::error::CliError;
use crate::git::{CommitInfo, SourceControl};
use git2::{PushOptions, RemoteCallbacks, Repository, StashFlags, StatusOptions, StatusShow};
use log::{debug, error};
use std::collections::HashMap;
use std::path::PathBuf;

/// git2-backed [SourceControl] implementation.
///
/// Holds the working directory path and opens the repository per call, so
/// every method can take `&self` even where git2 wants a mutable handle.
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Discover the repository containing the current directory.
    pub fn discover() -> Result<Self, CliError> {
        let current_dir = std::env::current_dir()?;
        debug!("Starting repository discovery from: {current_dir:?}");

        let repo = Repository::discover(&current_dir).map_err(|e| {
            error!("Failed to discover repository from {current_dir:?}: {e}");
            CliError::GitError(git2::Error::from_str(
                "Could not find Git repository in current directory or any parent directories",
            ))
        })?;

        let workdir = repo
            .workdir()
            .and_then(|p| p.canonicalize().ok())
            .ok_or_else(|| {
                CliError::GitError(git2::Error::from_str(
                    "Repository has no working directory",
                ))
            })?;

        Ok(GitRepo { workdir })
    }

    /// Use the repository at a known working directory.
    pub fn at(workdir: impl Into<PathBuf>) -> Self {
        GitRepo {
            workdir: workdir.into(),
        }
    }

    fn open(&self) -> Result<Repository, CliError> {
        Repository::open(&self.workdir).map_err(CliError::from)
    }

    fn ssh_callbacks<'a>() -> RemoteCallbacks<'a> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, _allowed_types| {
            git2::Cred::ssh_key(
                username_from_url.unwrap_or("git"),
                None,
                std::path::Path::new(&format!(
                    "{}/.ssh/id_rsa",
                    std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
                )),
                None,
            )
        });
        callbacks
    }
}

impl SourceControl for GitRepo {
    fn changed_files(&self) -> Result<Vec<String>, CliError> {
        let repo = self.open()?;
        let mut opts = StatusOptions::new();
        opts.include_ignored(false)
            .include_untracked(true)
            .include_unmodified(false)
            .recurse_untracked_dirs(true)
            .exclude_submodules(true)
            .show(StatusShow::IndexAndWorkdir);

        let statuses = repo.statuses(Some(&mut opts))?;
        let mut paths: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
        for entry in statuses.iter() {
            if let Some(path) = entry.path() {
                paths.insert(path.to_string());
            }
        }

        Ok(paths.into_iter().collect())
    }

    fn current_branch(&self) -> Result<String, CliError> {
        let repo = self.open()?;
        let branch = repo
            .head()?
            .shorthand()
            .map(String::from)
            .ok_or_else(|| CliError::GitError(git2::Error::from_str("HEAD has no branch name")));
        branch
    }

    fn latest_tag(&self) -> Result<Option<String>, CliError> {
        let repo = self.open()?;
        let head_oid = repo.head()?.peel_to_commit()?.id();

        // Map each tag to the commit it points at, annotated tags peeled
        let mut tagged_commits = HashMap::new();
        for tag_name in repo.tag_names(None)?.iter().flatten() {
            if let Ok(reference) = repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(commit) = reference.peel_to_commit() {
                    tagged_commits.insert(commit.id(), tag_name.to_string());
                }
            }
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.push(head_oid)?;
        for oid in revwalk.flatten() {
            if let Some(tag) = tagged_commits.get(&oid) {
                return Ok(Some(tag.clone()));
            }
        }

        Ok(None)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>, CliError> {
        let repo = self.open()?;
        debug!("Collecting commits since tag: {tag:?}");

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        if let Some(tag) = tag {
            let tag_commit = repo
                .revparse_single(tag)
                .ok()
                .and_then(|obj| obj.peel_to_commit().ok());
            if let Some(commit) = tag_commit {
                revwalk.hide(commit.id())?;
            }
        }

        let commits = revwalk
            .filter_map(|oid| oid.ok())
            .filter_map(|oid| repo.find_commit(oid).ok())
            .map(|commit| CommitInfo {
                message: commit.summary().unwrap_or("").to_string(),
                seconds: commit.time().seconds(),
            })
            .collect::<Vec<_>>();

        debug!("Found {} commit(s)", commits.len());
        Ok(commits)
    }

    fn diff_summary(&self) -> Result<String, CliError> {
        let repo = self.open()?;
        let head = repo.head()?.peel_to_commit()?;
        let head_tree = head.tree()?;
        let parent_tree = match head.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&head_tree), None)?;
        let mut text = String::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            match line.origin() {
                '+' | '-' | ' ' => text.push(line.origin()),
                _ => {}
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        Ok(text)
    }

    fn stage_all(&self) -> Result<(), CliError> {
        let repo = self.open()?;
        let mut index = repo.index()?;
        index.add_all(["*"], git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<(), CliError> {
        let repo = self.open()?;
        let signature = repo.signature()?;
        let mut index = repo.index()?;
        let oid = index.write_tree()?;
        let tree = repo.find_tree(oid)?;

        let parent_commit = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents = parent_commit.as_ref().map(|c| vec![c]).unwrap_or_default();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<(), CliError> {
        let repo = self.open()?;
        let head = repo.head()?.peel_to_commit()?;
        let signature = repo.signature()?;
        repo.tag(name, head.as_object(), &signature, name, false)?;
        Ok(())
    }

    fn stash_save(&self) -> Result<(), CliError> {
        let mut repo = self.open()?;
        let signature = repo.signature()?;
        match repo.stash_save(
            &signature,
            "auto-stash after failed release",
            Some(StashFlags::INCLUDE_UNTRACKED),
        ) {
            Ok(_) => Ok(()),
            // A clean working tree has nothing to stash
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_remotes(&self) -> Result<Vec<String>, CliError> {
        let repo = self.open()?;
        let mut remotes = repo
            .remotes()?
            .iter()
            .flatten()
            .map(String::from)
            .collect::<Vec<_>>();

        // "origin" first, others alphabetical
        remotes.sort_by(|a, b| {
            if a == "origin" {
                std::cmp::Ordering::Less
            } else if b == "origin" {
                std::cmp::Ordering::Greater
            } else {
                a.cmp(b)
            }
        });

        Ok(remotes)
    }

    fn push(&self, remote_name: &str, branch: &str, tag: &str) -> Result<(), CliError> {
        let repo = self.open()?;
        debug!("Pushing branch {branch} and tag {tag} to {remote_name}");

        let mut remote = repo.find_remote(remote_name)?;
        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(Self::ssh_callbacks());

        let refspecs = [
            format!("refs/heads/{}", branch),
            format!("refs/tags/{}", tag),
        ];
        remote
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| {
                error!("Failed to push to remote {}: {}", remote_name, e);
                if e.code() == git2::ErrorCode::Auth {
                    error!("Authentication error. Please ensure your SSH key is set up correctly.");
                    error!("You may need to add your SSH key to the ssh-agent or use HTTPS with a personal access token.");
                }
                CliError::from(e)
            })?;

        Ok(())
    }
}
