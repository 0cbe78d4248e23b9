use crate::common::command::{
    commit_file, get_branch_commit_sha, init_repository_dir, run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_ancestor_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "old"]).assert().success();
    commit_file(dir, "1.txt", "newer", "Move on");
    let master_tip = get_branch_commit_sha(dir, "master");

    run_gitlet_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "Given branch is an ancestor of the current branch.\n",
        ));

    assert_eq!(get_branch_commit_sha(dir, "master"), master_tip);
    assert_eq!(read_file(&dir.join("1.txt")), "newer");
}
