use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Date every test commit is stamped with, unless a test overrides it
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// `COMMIT_DATE` as printed by `log`
pub const READABLE_COMMIT_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with `1.txt` and `a/2.txt` committed on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["add", "a/2.txt"])
        .assert()
        .success();

    gitlet_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    gitlet_commit_at(dir, message, COMMIT_DATE)
}

pub fn gitlet_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["commit", message]);
    cmd.envs(vec![("GITLET_COMMIT_DATE", date)]);
    cmd
}

/// Stage `path` with `content` and commit it
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_gitlet_command(dir, &["add", path]).assert().success();
    gitlet_commit(dir, message).assert().success();
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not valid UTF-8")
}

/// Read the commit a branch points at
pub fn get_branch_commit_sha(dir: &Path, branch: &str) -> String {
    let ref_file = dir.join(".gitlet").join("refs").join("heads").join(branch);
    std::fs::read_to_string(&ref_file)
        .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", ref_file, e))
        .trim()
        .to_string()
}

/// Get the current HEAD commit SHA
pub fn get_head_commit_sha(dir: &Path) -> String {
    let head_path = dir.join(".gitlet").join("HEAD");
    let head_content = std::fs::read_to_string(&head_path)
        .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", head_path, e));

    let branch = head_content
        .trim()
        .strip_prefix("ref: refs/heads/")
        .unwrap_or_else(|| panic!("HEAD is not a branch reference: {head_content}"));
    get_branch_commit_sha(dir, branch)
}
