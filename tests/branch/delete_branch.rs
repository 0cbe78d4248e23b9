use crate::common::command::{init_repository_dir, run_gitlet_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn delete_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    run_gitlet_command(dir, &["rm-branch", "feature/login"])
        .assert()
        .success();

    assert!(!dir.join(".gitlet/refs/heads/feature").exists());
    let status = stdout_of(&mut run_gitlet_command(dir, &["status"]));
    assert!(status.starts_with("=== Branches ===\n*master\n\n"));

    // the commits stay reachable through the other branches
    let log = stdout_of(&mut run_gitlet_command(dir, &["log"]));
    assert!(log.contains("Initial commit"));
}

#[rstest]
fn delete_the_current_branch_fails(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .code(1)
        .stderr(predicate::eq("Cannot remove the current branch.\n"));
}

#[rstest]
fn delete_an_unknown_branch_fails(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["rm-branch", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::eq("A branch with that name does not exist.\n"));
}
