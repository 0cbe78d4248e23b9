use crate::common::command::{init_repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case::missing_file("missing.txt")]
#[case::directory("a")]
fn adding_a_missing_file_fails(init_repository_dir: TempDir, #[case] path: &str) {
    run_gitlet_command(init_repository_dir.path(), &["add", path])
        .assert()
        .code(1)
        .stderr(predicate::eq("File does not exist.\n"));
}
