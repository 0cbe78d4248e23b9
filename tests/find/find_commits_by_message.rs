use crate::common::command::{
    commit_file, get_branch_commit_sha, get_head_commit_sha, repository_dir, run_gitlet_command,
    stdout_of,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;

#[rstest]
fn find_commits_by_message(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    commit_file(dir, "master.txt", "master", "Same message");

    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "feature.txt", "feature", "Same message");
    commit_file(dir, "other.txt", "other", "Other message");

    let found = stdout_of(&mut run_gitlet_command(dir, &["find", "Same message"]));
    let found = found.lines().map(str::to_string).collect::<BTreeSet<_>>();

    let feature_commit = stdout_of(&mut run_gitlet_command(dir, &["find", "Other message"]));
    assert_eq!(feature_commit.trim(), get_head_commit_sha(dir));

    let expected = BTreeSet::from([
        get_branch_commit_sha(dir, "master"),
        stdout_of(&mut run_gitlet_command(dir, &["log"]))
            .lines()
            .filter_map(|line| line.strip_prefix("commit "))
            .nth(1)
            .expect("feature history is too short")
            .to_string(),
    ]);
    assert_eq!(found, expected);
}

#[rstest]
#[case::unknown_message("Never written")]
#[case::partial_message("initial")]
fn find_without_a_match_fails(repository_dir: TempDir, #[case] message: &str) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["find", message])
        .assert()
        .code(1)
        .stderr(predicate::eq("Found no commit with that message.\n"));
}
