use crate::common::command::{commit_file, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_with_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    commit_file(dir, "1.txt", "master one", "Edit on master");

    write_file(FileSpec::new(dir.join("stray.txt"), "stray".to_string()));

    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ))
        .stderr(predicate::str::contains("stray.txt"));

    // nothing moved
    assert_eq!(read_file(&dir.join("1.txt")), "master one");
    assert_eq!(read_file(&dir.join("stray.txt")), "stray");
    let head = std::fs::read_to_string(dir.join(".gitlet").join("HEAD")).unwrap();
    assert_eq!(head.trim(), "ref: refs/heads/master");
}
