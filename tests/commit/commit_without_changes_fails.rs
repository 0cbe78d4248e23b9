use crate::common::command::{get_head_commit_sha, gitlet_commit, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_without_changes_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir);

    // unstaged edits do not count
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));

    gitlet_commit(dir, "Nothing staged")
        .assert()
        .code(1)
        .stderr(predicate::eq("No changes added to the commit.\n"));

    assert_eq!(get_head_commit_sha(dir), head);
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
fn commit_with_blank_message_fails(init_repository_dir: TempDir, #[case] message: &str) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();

    gitlet_commit(dir, message)
        .assert()
        .code(1)
        .stderr(predicate::eq("Please enter a commit message.\n"));
}
