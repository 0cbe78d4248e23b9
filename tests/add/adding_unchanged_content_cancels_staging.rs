use crate::common::command::{init_repository_dir, run_gitlet_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn adding_reverted_content_cancels_staging(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();

    let status = stdout_of(&mut run_gitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn adding_a_removed_file_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();

    let status = stdout_of(&mut run_gitlet_command(dir, &["status"]));
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\n\n"));
}
