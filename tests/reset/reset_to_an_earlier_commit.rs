use crate::common::command::{
    commit_file, get_branch_commit_sha, get_head_commit_sha, init_repository_dir,
    run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_to_an_earlier_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir);
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();

    commit_file(dir, "1.txt", "uno", "Translate");
    commit_file(dir, "b/3.txt", "three", "Add 3.txt");

    write_file(FileSpec::new(dir.join("staged.txt"), "staged".to_string()));
    run_gitlet_command(dir, &["add", "staged.txt"])
        .assert()
        .success();

    run_gitlet_command(dir, &["reset", &first[..10]])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(get_branch_commit_sha(dir, "master"), first);
    assert_eq!(get_branch_commit_sha(dir, "feature"), first);
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert!(!dir.join("b").exists());
    assert!(!dir.join("staged.txt").exists());

    let status = stdout_of(&mut run_gitlet_command(dir, &["status"]));
    assert_eq!(
        status,
        "=== Branches ===\nfeature\n*master\n\n\
         === Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );

    let log = stdout_of(&mut run_gitlet_command(dir, &["log"]));
    assert!(log.starts_with(&format!("===\ncommit {first}\n")));
}

#[rstest]
fn reset_keeps_unrelated_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir);
    commit_file(dir, "1.txt", "uno", "Translate");
    write_file(FileSpec::new(dir.join("notes.txt"), "notes".to_string()));

    run_gitlet_command(dir, &["reset", &first]).assert().success();

    assert_eq!(read_file(&dir.join("notes.txt")), "notes");
    assert_eq!(read_file(&dir.join("1.txt")), "one");
}

#[rstest]
fn reset_to_an_unknown_commit_fails(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["reset", "ffffffff"])
        .assert()
        .code(1)
        .stderr(predicate::eq("No commit with that id exists.\n"));
}
