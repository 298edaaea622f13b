use crate::common::command::{
    add_and_commit, committed_repository_dir, head_commit_id, log_commit_ids, run_twig_command,
    twig_commit,
};
use crate::common::file::{read_file, write_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::path::Path;

mod common;

fn checkout(dir: &Path, branch: &str) {
    run_twig_command(dir, &["checkout", branch])
        .assert()
        .success();
}

/// History:
///
/// ```text
///   S --- M      (master: edits 1.txt, removes 2.txt)
///    \
///     O          (other: edits 1.txt differently, adds 3.txt)
/// ```
fn diverged_repository(dir: &Path) {
    run_twig_command(dir, &["branch", "other"]).assert().success();

    write_files(dir, &[("1.txt", "master one\n")]);
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    run_twig_command(dir, &["rm", "2.txt"]).assert().success();
    twig_commit(dir, "Master work").assert().success();

    checkout(dir, "other");
    write_files(dir, &[("1.txt", "other one\n"), ("3.txt", "three\n")]);
    add_and_commit(dir, &["1.txt", "3.txt"], "Other work");

    checkout(dir, "master");
}

#[rstest]
fn merge_with_conflict_writes_markers_and_commits(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    diverged_repository(dir);
    let master_head = head_commit_id(dir);

    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n  conflict: 1.txt\n");

    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\nmaster one\n=======\nother one\n>>>>>>>\n"
    );
    assert_eq!(read_file(&dir.join("3.txt")), "three\n");
    assert!(!dir.join("2.txt").exists());

    let ids = log_commit_ids(dir);
    assert_eq!(ids[1], master_head);
    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged other into master."))
        .stdout(predicate::str::is_match(r"Merge: [0-9a-f]{7} [0-9a-f]{7}\n").unwrap());

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn merge_takes_changes_made_only_on_the_other_branch(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();

    write_files(dir, &[("master.txt", "master\n")]);
    add_and_commit(dir, &["master.txt"], "Master only");

    checkout(dir, "other");
    write_files(dir, &[("1.txt", "other one\n")]);
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    run_twig_command(dir, &["rm", "2.txt"]).assert().success();
    twig_commit(dir, "Other edits").assert().success();

    checkout(dir, "master");
    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("1.txt")), "other one\n");
    assert_eq!(read_file(&dir.join("master.txt")), "master\n");
    assert!(!dir.join("2.txt").exists());
    assert_eq!(log_commit_ids(dir).len(), 4);
}

#[rstest]
fn merge_of_a_descendant_fast_forwards(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_twig_command(dir, &["branch", "ahead"]).assert().success();
    checkout(dir, "ahead");
    write_files(dir, &[("ahead.txt", "ahead\n")]);
    add_and_commit(dir, &["ahead.txt"], "Ahead");
    let ahead_head = head_commit_id(dir);
    checkout(dir, "master");

    run_twig_command(dir, &["merge", "ahead"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(head_commit_id(dir), ahead_head);
    assert_eq!(read_file(&dir.join("ahead.txt")), "ahead\n");
}

#[rstest]
fn merge_of_an_ancestor_changes_nothing(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_twig_command(dir, &["branch", "behind"]).assert().success();
    write_files(dir, &[("new.txt", "new\n")]);
    add_and_commit(dir, &["new.txt"], "Newer");
    let head = head_commit_id(dir);

    run_twig_command(dir, &["merge", "behind"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn merge_with_staged_changes_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    diverged_repository(dir);
    write_files(dir, &[("pending.txt", "pending\n")]);
    run_twig_command(dir, &["add", "pending.txt"]).assert().success();

    run_twig_command(dir, &["merge", "other"])
        .assert()
        .failure()
        .code(1)
        .stdout("You have uncommitted changes.\n");
}

#[rstest]
fn merge_refuses_to_overwrite_untracked_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    diverged_repository(dir);
    let head = head_commit_id(dir);
    write_files(dir, &[("3.txt", "mine\n")]);

    run_twig_command(dir, &["merge", "other"])
        .assert()
        .failure()
        .code(1)
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(read_file(&dir.join("3.txt")), "mine\n");
    assert_eq!(read_file(&dir.join("1.txt")), "master one\n");
    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
#[case("master", "Cannot merge a branch with itself.\n")]
#[case("ghost", "A branch with that name does not exist.\n")]
fn merge_errors(committed_repository_dir: TempDir, #[case] branch: &str, #[case] message: &str) {
    run_twig_command(committed_repository_dir.path(), &["merge", branch])
        .assert()
        .failure()
        .code(1)
        .stdout(message.to_string());
}

#[rstest]
fn merge_commit_history_is_followed_through_first_parents(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    diverged_repository(dir);
    run_twig_command(dir, &["merge", "other"]).assert().success();
    checkout(dir, "other");
    let other_ids = log_commit_ids(dir);
    checkout(dir, "master");

    let master_ids = log_commit_ids(dir);
    assert!(!master_ids.contains(&other_ids[0]));

    // merging again finds other's head in master's history
    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");
}

#[rstest]
fn merge_names_every_conflicting_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    write_files(dir, &[("1.txt", "master one\n"), ("2.txt", "master two\n")]);
    add_and_commit(dir, &["1.txt", "2.txt"], "Master edits");

    checkout(dir, "other");
    write_files(dir, &[("1.txt", "other one\n"), ("2.txt", "other two\n")]);
    add_and_commit(dir, &["1.txt", "2.txt"], "Other edits");
    checkout(dir, "master");

    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n  conflict: 1.txt\n  conflict: 2.txt\n");

    assert_eq!(
        read_file(&dir.join("2.txt")),
        "<<<<<<< HEAD\nmaster two\n=======\nother two\n>>>>>>>\n"
    );
}
