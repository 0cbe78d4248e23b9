use crate::common::command::{repository_dir, run_gitlet_command, stdout_of};
use assert_fs::TempDir;
use assert_fs::prelude::PathChild;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(repository_dir.child(".gitlet/objects").path().is_dir());
    assert!(repository_dir.child(".gitlet/refs/heads/master").path().is_file());
    assert!(repository_dir.child(".gitlet/index").path().is_file());

    let head = std::fs::read_to_string(repository_dir.child(".gitlet/HEAD").path())?;
    assert_eq!(head.trim(), "ref: refs/heads/master");

    Ok(())
}

#[rstest]
fn root_commit_is_shared_by_every_repository(
    #[from(repository_dir)] first: TempDir,
    #[from(repository_dir)] second: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(first.path(), &["init"]).assert().success();
    run_gitlet_command(second.path(), &["init"]).assert().success();

    let first_log = stdout_of(&mut run_gitlet_command(first.path(), &["log"]));
    let second_log = stdout_of(&mut run_gitlet_command(second.path(), &["log"]));

    assert_eq!(first_log, second_log);
    assert!(first_log.ends_with("Date: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"));

    Ok(())
}
