use crate::common::command::{
    commit_file, get_branch_commit_sha, init_repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_fast_forward(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "1.txt", "feature one", "Feature edit");
    commit_file(dir, "b/3.txt", "three", "Feature add");
    let feature_tip = get_branch_commit_sha(dir, "feature");

    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    run_gitlet_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq("Current branch fast-forwarded.\n"));

    assert_eq!(get_branch_commit_sha(dir, "master"), feature_tip);
    assert_eq!(read_file(&dir.join("1.txt")), "feature one");
    assert_eq!(read_file(&dir.join("b").join("3.txt")), "three");

    // no merge commit was created
    let log = stdout_of(&mut run_gitlet_command(dir, &["log"]));
    assert!(!log.contains("Merge:"));
    assert!(log.starts_with(&format!("===\ncommit {feature_tip}\n")));

    let head = std::fs::read_to_string(dir.join(".gitlet").join("HEAD")).unwrap();
    assert_eq!(head.trim(), "ref: refs/heads/master");
}

#[rstest]
fn fast_forward_keeps_untracked_files_the_target_leaves_alone(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "b/3.txt", "three", "Feature add");
    let feature_tip = get_branch_commit_sha(dir, "feature");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    std::fs::write(dir.join("notes.txt"), "scratch").unwrap();

    run_gitlet_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq("Current branch fast-forwarded.\n"));

    assert_eq!(get_branch_commit_sha(dir, "master"), feature_tip);
    assert_eq!(read_file(&dir.join("notes.txt")), "scratch");
}
