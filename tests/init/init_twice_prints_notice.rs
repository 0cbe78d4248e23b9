use crate::common::command::{init_repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_twice_prints_notice(init_repository_dir: TempDir) {
    let head_before = std::fs::read_to_string(init_repository_dir.path().join(".gitlet/HEAD"))
        .expect("Failed to read HEAD");

    run_gitlet_command(init_repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "A Gitlet version-control system already exists in the current directory.\n",
        ));

    let head_after = std::fs::read_to_string(init_repository_dir.path().join(".gitlet/HEAD"))
        .expect("Failed to read HEAD");
    assert_eq!(head_before, head_after);
}
