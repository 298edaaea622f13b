use crate::common::file::write_files;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// A repository whose `master` tracks `1.txt` and `2.txt`
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_files(
        init_repository_dir.path(),
        &[("1.txt", "one\n"), ("2.txt", "two\n")],
    );
    add_and_commit(init_repository_dir.path(), &["1.txt", "2.txt"], "First commit");

    init_repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("TZ", "UTC")]);
    cmd.env_remove("TWIG_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", message]);
    cmd.env("TWIG_COMMIT_DATE", COMMIT_DATE); // %Y-%m-%d %H:%M:%S %z
    cmd
}

pub fn add_and_commit(dir: &Path, files: &[&str], message: &str) {
    for file in files {
        run_twig_command(dir, &["add", file]).assert().success();
    }
    twig_commit(dir, message).assert().success();
}

/// Commit ids printed by `twig log`, newest first
pub fn log_commit_ids(dir: &Path) -> Vec<String> {
    let output = run_twig_command(dir, &["log"])
        .output()
        .expect("Failed to run twig log");
    let stdout = String::from_utf8(output.stdout).expect("log output is not UTF-8");

    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

pub fn head_commit_id(dir: &Path) -> String {
    log_commit_ids(dir)
        .into_iter()
        .next()
        .expect("log printed no commits")
}
