mod common;

use relcut::config::RunOptions;
use relcut::error::CliError;
use relcut::git::FakeRepo;
use relcut::input::ScriptedOperator;
use relcut::release::{ReleaseOrchestrator, ReleaseOutcome};
use std::fs;
use tempfile::TempDir;

// 2024-01-01T12:00:00Z and 2024-01-02T12:00:00Z
const JAN_1: i64 = 1_704_110_400;
const JAN_2: i64 = 1_704_196_800;

// Candidate order is prerelease-alpha, prerelease-beta, patch, minor, major
const PATCH: usize = 2;

fn stores(version: &str, changelog: &str) -> (TempDir, RunOptions) {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        file_version: dir.path().join("version.txt"),
        file_changelog: dir.path().join("changes.md"),
        dry_run: false,
    };
    fs::write(&options.file_version, version).unwrap();
    fs::write(&options.file_changelog, changelog).unwrap();
    (dir, options)
}

fn released_repo() -> FakeRepo {
    FakeRepo::new()
        .with_latest_tag("1.2.3")
        .with_commit("fix bug", JAN_2)
        .with_commit("add feature", JAN_1)
        .with_diff("+fixed line\n")
}

#[test]
fn test_patch_release_end_to_end() {
    common::setup_test_env();
    let (_dir, options) = stores("1.2.3\n", "# Title\n\nOld entry\n");
    let repo = released_repo().with_remotes(&["origin", "backup"]);
    let operator = ScriptedOperator::new()
        .will_choose(PATCH)
        .will_edit(None)
        .will_select(None)
        .will_confirm(true);

    let outcome = ReleaseOrchestrator::new(&repo, &operator, options.clone())
        .run()
        .unwrap();
    match outcome {
        ReleaseOutcome::Completed { version } => assert_eq!(version, "1.2.4"),
        other => panic!("expected Completed, got {:?}", other),
    }

    assert_eq!(fs::read_to_string(&options.file_version).unwrap(), "1.2.4");
    assert_eq!(
        fs::read_to_string(&options.file_changelog).unwrap(),
        "# Title\n\n- 1.2.4 [ 2024-01-01 – 2024-01-02 ]\n    -fix bug\n    -add feature\nOld entry\n"
    );

    let ops = repo.recorded();
    assert_eq!(ops.stage_calls, 1);
    assert_eq!(ops.commits, vec!["version 1.2.4".to_string()]);
    assert_eq!(ops.tags, vec!["1.2.4".to_string()]);
    assert_eq!(
        ops.pushes,
        vec![
            ("origin".to_string(), "main".to_string(), "1.2.4".to_string()),
            ("backup".to_string(), "main".to_string(), "1.2.4".to_string()),
        ]
    );
    assert_eq!(ops.stash_calls, 0);
}

#[test]
fn test_edited_note_is_merged_verbatim() {
    common::setup_test_env();
    let (_dir, options) = stores("1.2.3", "# Title\n\nOld entry\n");
    let repo = released_repo();
    let operator = ScriptedOperator::new()
        .will_choose(PATCH)
        .will_edit(Some(
            "- 1.2.4 [ 2024-01-01 – 2024-01-02 ]\n    -fix bug",
        ))
        .will_select(None)
        .will_confirm(true);

    ReleaseOrchestrator::new(&repo, &operator, options.clone())
        .run()
        .unwrap();

    assert_eq!(
        fs::read_to_string(&options.file_changelog).unwrap(),
        "# Title\n\n- 1.2.4 [ 2024-01-01 – 2024-01-02 ]\n    -fix bug\nOld entry\n"
    );
}

#[test]
fn test_dry_run_performs_zero_writes() {
    common::setup_test_env();
    let (_dir, mut options) = stores("1.2.3", "# Title\n\nOld entry\n");
    options.dry_run = true;
    let repo = released_repo().with_remotes(&["origin", "backup"]);
    let operator = ScriptedOperator::new()
        .will_choose(PATCH)
        .will_edit(None)
        .will_select(None)
        .will_confirm(true);

    let outcome = ReleaseOrchestrator::new(&repo, &operator, options.clone())
        .run()
        .unwrap();
    assert!(matches!(outcome, ReleaseOutcome::Completed { .. }));

    assert_eq!(fs::read_to_string(&options.file_version).unwrap(), "1.2.3");
    assert_eq!(
        fs::read_to_string(&options.file_changelog).unwrap(),
        "# Title\n\nOld entry\n"
    );
    assert_eq!(repo.recorded(), Default::default());
}

#[test]
fn test_uncommitted_changes_abort_before_anything_runs() {
    common::setup_test_env();
    let (_dir, options) = stores("1.2.3", "# Title\n\nOld entry\n");
    let repo = released_repo().with_changed_files(&["src/wip.rs"]);
    let operator = ScriptedOperator::new();

    let result = ReleaseOrchestrator::new(&repo, &operator, options).run();
    assert!(matches!(result, Err(CliError::UncommittedChanges(1))));
    // Precondition failures never trigger the stash recovery
    assert_eq!(repo.recorded().stash_calls, 0);
}

#[test]
fn test_dry_run_reports_dirty_tree_and_continues() {
    common::setup_test_env();
    let (_dir, mut options) = stores("1.2.3", "# Title\n\nOld entry\n");
    options.dry_run = true;
    let repo = released_repo().with_changed_files(&["src/wip.rs"]);
    let operator = ScriptedOperator::new()
        .will_choose(PATCH)
        .will_edit(None)
        .will_select(None)
        .will_confirm(true);

    let outcome = ReleaseOrchestrator::new(&repo, &operator, options)
        .run()
        .unwrap();
    assert!(matches!(outcome, ReleaseOutcome::Completed { .. }));
}

#[test]
fn test_no_remotes_fails_and_stashes() {
    common::setup_test_env();
    let (_dir, options) = stores("1.2.3", "# Title\n\nOld entry\n");
    let repo = released_repo().with_remotes(&[]);
    let operator = ScriptedOperator::new().will_choose(PATCH).will_edit(None);

    let outcome = ReleaseOrchestrator::new(&repo, &operator, options)
        .run()
        .unwrap();
    match outcome {
        ReleaseOutcome::Failed { error, recovered } => {
            assert!(matches!(error, CliError::NoRemotes));
            assert!(recovered);
        }
        other => panic!("expected Failed, got {:?}", other),
    }

    // Commit and tag already happened before the push step failed
    let ops = repo.recorded();
    assert_eq!(ops.commits, vec!["version 1.2.4".to_string()]);
    assert_eq!(ops.tags, vec!["1.2.4".to_string()]);
    assert!(ops.pushes.is_empty());
    assert_eq!(ops.stash_calls, 1);
}

#[test]
fn test_declined_push_confirmation_fails_the_run() {
    common::setup_test_env();
    let (_dir, options) = stores("1.2.3", "# Title\n\nOld entry\n");
    let repo = released_repo();
    let operator = ScriptedOperator::new()
        .will_choose(PATCH)
        .will_edit(None)
        .will_select(None)
        .will_confirm(false);

    let outcome = ReleaseOrchestrator::new(&repo, &operator, options)
        .run()
        .unwrap();
    match outcome {
        ReleaseOutcome::Failed { error, recovered } => {
            assert!(matches!(error, CliError::PushCancelled));
            assert!(recovered);
        }
        other => panic!("expected Failed, got {:?}", other),
    }

    let ops = repo.recorded();
    assert_eq!(ops.commits.len(), 1);
    assert_eq!(ops.tags.len(), 1);
    assert!(ops.pushes.is_empty());
}

#[test]
fn test_unreadable_version_file_is_reported_and_recovered() {
    common::setup_test_env();
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        file_version: dir.path().join("missing.txt"),
        file_changelog: dir.path().join("changes.md"),
        dry_run: false,
    };
    fs::write(&options.file_changelog, "# Title\n\n").unwrap();

    let repo = FakeRepo::new();
    let operator = ScriptedOperator::new();
    let outcome = ReleaseOrchestrator::new(&repo, &operator, options)
        .run()
        .unwrap();
    match outcome {
        ReleaseOutcome::Failed { error, recovered } => {
            assert!(matches!(error, CliError::VersionFileRead { .. }));
            assert!(recovered);
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn test_invalid_version_is_reported_and_recovered() {
    common::setup_test_env();
    let (_dir, options) = stores("not-a-version", "# Title\n\nOld entry\n");
    let repo = FakeRepo::new();
    let operator = ScriptedOperator::new();

    let outcome = ReleaseOrchestrator::new(&repo, &operator, options.clone())
        .run()
        .unwrap();
    match outcome {
        ReleaseOutcome::Failed { error, recovered } => {
            assert!(matches!(error, CliError::InvalidVersion(_, _)));
            assert!(recovered);
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(&options.file_version).unwrap(),
        "not-a-version"
    );
}

#[test]
fn test_changelog_without_separator_fails() {
    common::setup_test_env();
    let (_dir, options) = stores("1.2.3", "# Title without blank line");
    let repo = released_repo();
    let operator = ScriptedOperator::new().will_choose(PATCH).will_edit(None);

    let outcome = ReleaseOrchestrator::new(&repo, &operator, options)
        .run()
        .unwrap();
    match outcome {
        ReleaseOutcome::Failed { error, .. } => {
            assert!(matches!(error, CliError::ChangelogFormat));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn test_push_only_to_selected_remotes() {
    common::setup_test_env();
    let (_dir, options) = stores("1.2.3", "# Title\n\nOld entry\n");
    let repo = released_repo().with_remotes(&["origin", "backup", "mirror"]);
    let operator = ScriptedOperator::new()
        .will_choose(PATCH)
        .will_edit(None)
        .will_select(Some(vec![0, 2]))
        .will_confirm(true);

    ReleaseOrchestrator::new(&repo, &operator, options)
        .run()
        .unwrap();

    let pushed: Vec<String> = repo
        .recorded()
        .pushes
        .into_iter()
        .map(|(remote, _, _)| remote)
        .collect();
    assert_eq!(pushed, vec!["origin".to_string(), "mirror".to_string()]);
}
