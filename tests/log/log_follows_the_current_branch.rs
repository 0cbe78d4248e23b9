use crate::common::command::{
    READABLE_COMMIT_DATE, commit_file, get_head_commit_sha, repository_dir, run_gitlet_command,
    stdout_of,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_lists_history_newest_first(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();
    let root = get_head_commit_sha(dir);

    commit_file(dir, "file1.txt", "content 1", "First commit");
    let first = get_head_commit_sha(dir);
    commit_file(dir, "file2.txt", "content 2", "Second commit");
    let second = get_head_commit_sha(dir);

    let log = stdout_of(&mut run_gitlet_command(dir, &["log"]));

    assert_eq!(
        log,
        format!(
            "===\ncommit {second}\nDate: {READABLE_COMMIT_DATE}\nSecond commit\n\n\
             ===\ncommit {first}\nDate: {READABLE_COMMIT_DATE}\nFirst commit\n\n\
             ===\ncommit {root}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"
        )
    );
}

#[rstest]
fn log_only_shows_the_current_branch(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();
    commit_file(dir, "shared.txt", "shared", "Shared commit");

    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    commit_file(dir, "master.txt", "master", "Master commit");

    run_gitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "feature.txt", "feature", "Feature commit");

    let log = stdout_of(&mut run_gitlet_command(dir, &["log"]));

    assert!(log.contains("Feature commit"));
    assert!(log.contains("Shared commit"));
    assert!(!log.contains("Master commit"));
}
