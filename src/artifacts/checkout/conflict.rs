use crate::areas::index::Index;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::Commit;
use std::path::{Path, PathBuf};

/// Which untracked files block a switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictType {
    /// Any untracked file blocks the switch (branch checkout)
    UntrackedPresent,
    /// Only untracked files the target commit would clobber block the switch (reset, merge)
    ///
    /// Besides the paths the target tracks, this covers an untracked file standing
    /// where the target needs a directory, and one inside a directory the target
    /// replaces with a file.
    UntrackedOverwritten,
}

impl ConflictType {
    /// Collect the workspace files that block switching from `head` to `target`
    ///
    /// A file is untracked when the HEAD commit does not track it and it is not staged
    /// for addition.
    pub fn detect(
        &self,
        workspace_files: &[PathBuf],
        head: &Commit,
        index: &Index,
        target: &Commit,
    ) -> Vec<PathBuf> {
        workspace_files
            .iter()
            .filter(|path| is_untracked(path, head, index))
            .filter(|path| match self {
                ConflictType::UntrackedPresent => true,
                ConflictType::UntrackedOverwritten => is_in_the_way(path, target),
            })
            .cloned()
            .collect()
    }

    /// Fail with [`RepositoryError::UntrackedFileConflict`] if any file blocks the switch
    pub fn check(
        &self,
        workspace_files: &[PathBuf],
        head: &Commit,
        index: &Index,
        target: &Commit,
    ) -> anyhow::Result<()> {
        let conflicts = self.detect(workspace_files, head, index, target);

        if conflicts.is_empty() {
            Ok(())
        } else {
            tracing::debug!(?conflicts, kind = ?self, "untracked files in the way");
            Err(RepositoryError::UntrackedFileConflict(conflicts).into())
        }
    }
}

pub fn is_untracked(path: &Path, head: &Commit, index: &Index) -> bool {
    !head.tracks(path) && !index.is_staged_for_addition(path)
}

// component-wise, so `a` does not collide with `ab.txt`
fn is_in_the_way(path: &Path, target: &Commit) -> bool {
    target
        .files()
        .keys()
        .any(|tracked| tracked.starts_with(path) || path.starts_with(tracked))
}
