use crate::common::command::{
    add_and_commit, committed_repository_dir, head_commit_id, run_twig_command,
};
use crate::common::file::write_files;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn branch_points_at_head_without_switching(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    let head = head_commit_id(dir);

    run_twig_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout("");

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\nfeature\n*master\n\n",
        ));

    run_twig_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn branch_with_existing_name_fails(committed_repository_dir: TempDir) {
    run_twig_command(committed_repository_dir.path(), &["branch", "master"])
        .assert()
        .failure()
        .code(1)
        .stdout("A branch with that name already exists.\n");
}

#[rstest]
#[case("../escape")]
#[case("bad name")]
#[case(".hidden")]
#[case("trailing.lock")]
fn branch_with_invalid_name_fails(committed_repository_dir: TempDir, #[case] name: &str) {
    run_twig_command(committed_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with("invalid branch name"));
}

#[rstest]
fn rm_branch_keeps_commits(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    run_twig_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    write_files(dir, &[("f.txt", "feature\n")]);
    add_and_commit(dir, &["f.txt"], "Feature work");
    let feature_head = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_twig_command(dir, &["rm-branch", "feature"])
        .assert()
        .success()
        .stdout("");

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*master\n\n"));
    run_twig_command(dir, &["find", "Feature work"])
        .assert()
        .success()
        .stdout(format!("{feature_head}\n"));
}

#[rstest]
#[case("master", "Cannot remove the current branch.\n")]
#[case("ghost", "A branch with that name does not exist.\n")]
fn rm_branch_errors(
    committed_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    run_twig_command(committed_repository_dir.path(), &["rm-branch", branch])
        .assert()
        .failure()
        .code(1)
        .stdout(message.to_string());
}
