use crate::common::command::{
    get_head_commit_sha, gitlet_commit, init_repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_with_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir);

    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();
    gitlet_commit(dir, "Drop 1.txt").assert().success();
    let second = get_head_commit_sha(dir);

    // the target tracks 1.txt, so an untracked copy would be overwritten
    write_file(FileSpec::new(dir.join("1.txt"), "precious".to_string()));

    run_gitlet_command(dir, &["reset", &first])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    assert_eq!(get_head_commit_sha(dir), second);
    assert_eq!(read_file(&dir.join("1.txt")), "precious");
}
