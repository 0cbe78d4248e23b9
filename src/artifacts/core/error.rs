//! User-facing failures
//!
//! Every operation returns `anyhow::Result`. Failures a user can act on are raised as a
//! [`RepositoryError`] so the CLI can downcast them, print the message and pick an exit
//! code from the [`ErrorKind`]. Anything else reaching the CLI is treated as a corrupt
//! or unreadable repository.

use std::path::PathBuf;
use thiserror::Error;

/// How a [`RepositoryError`] is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: missing file, unknown branch or commit, empty message
    UserInput,
    /// The repository is in a state that forbids the operation
    StateConflict,
    /// Nothing went wrong, the operation had nothing to do
    Notice,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("File does not exist.")]
    FileNotFound(PathBuf),

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NoReasonToRemove(PathBuf),

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("No commit with that id exists.")]
    NoSuchCommit(String),

    #[error("Commit id prefix '{0}' is ambiguous.")]
    AmbiguousCommit(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(PathBuf),

    #[error("A branch with that name does not exist.")]
    NoSuchBranch(String),

    #[error("A branch with that name already exists.")]
    BranchExists(String),

    #[error("Invalid branch name '{0}'.")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.{}", format_paths(.0))]
    UntrackedFileConflict(Vec<PathBuf>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("No common ancestor found.")]
    NoCommonAncestor,

    #[error("No need to checkout the current branch.")]
    NothingToDo,
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotInitialized
            | RepositoryError::FileNotFound(_)
            | RepositoryError::EmptyMessage
            | RepositoryError::NoCommitWithMessage
            | RepositoryError::NoSuchCommit(_)
            | RepositoryError::AmbiguousCommit(_)
            | RepositoryError::FileNotInCommit(_)
            | RepositoryError::NoSuchBranch(_)
            | RepositoryError::InvalidBranchName(_) => ErrorKind::UserInput,
            RepositoryError::NothingToCommit
            | RepositoryError::NoReasonToRemove(_)
            | RepositoryError::BranchExists(_)
            | RepositoryError::CannotRemoveCurrent
            | RepositoryError::UntrackedFileConflict(_)
            | RepositoryError::UncommittedChanges
            | RepositoryError::SelfMerge
            | RepositoryError::NoCommonAncestor => ErrorKind::StateConflict,
            RepositoryError::NothingToDo => ErrorKind::Notice,
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("\n\t{}", path.display()))
        .collect()
}
