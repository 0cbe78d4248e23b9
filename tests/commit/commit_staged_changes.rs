use crate::common::command::{
    get_head_commit_sha, gitlet_commit, gitlet_commit_at, init_repository_dir, repository_dir,
    run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;

#[rstest]
fn commit_staged_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let parent = get_head_commit_sha(dir);

    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();
    run_gitlet_command(dir, &["rm", "a/2.txt"]).assert().success();
    gitlet_commit(dir, "Second commit").assert().success();

    let head = get_head_commit_sha(dir);
    assert_ne!(head, parent);

    let status = stdout_of(&mut run_gitlet_command(dir, &["status"]));
    assert_eq!(
        status,
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );

    // the removal is part of the snapshot: restoring it from HEAD fails
    run_gitlet_command(dir, &["checkout", "--", "a/2.txt"])
        .assert()
        .code(1);

    write_file(FileSpec::new(dir.join("1.txt"), "scratch".to_string()));
    run_gitlet_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("1.txt")), "uno");
}

#[rstest]
fn commit_identity_ignores_the_timestamp(
    #[from(repository_dir)] first: TempDir,
    #[from(repository_dir)] second: TempDir,
) {
    for (dir, date) in [
        (first.path(), "2023-01-01 12:00:00 +0000"),
        (second.path(), "2024-06-30 08:15:00 +0200"),
    ] {
        run_gitlet_command(dir, &["init"]).assert().success();
        write_file(FileSpec::new(dir.join("same.txt"), "same".to_string()));
        run_gitlet_command(dir, &["add", "same.txt"])
            .assert()
            .success();
        gitlet_commit_at(dir, "Same snapshot", date)
            .assert()
            .success();
    }

    assert_eq!(
        get_head_commit_sha(first.path()),
        get_head_commit_sha(second.path())
    );
}
