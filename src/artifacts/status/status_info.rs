use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub current_branch: BranchName,
    /// Every branch, sorted by name
    pub branches: Vec<BranchName>,
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    /// Modifications not staged for commit
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let (_, head) = self.repository.head_commit()?;

        let workspace_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .map(|path| {
                let oid = self.repository.workspace().parse_blob(&path)?.object_id()?;
                Ok((path, oid))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        Ok(StatusInfo {
            current_branch: refs.current_branch()?,
            branches: refs.list_branches()?,
            staged_files: index.added().keys().cloned().collect(),
            removed_files: index.removed().clone(),
            workspace_changeset: Self::detect_workspace_changes(&workspace_files, &head, index),
            untracked_files: Self::detect_untracked_files(&workspace_files, &head, index),
        })
    }

    fn detect_workspace_changes(
        workspace_files: &BTreeMap<PathBuf, ObjectId>,
        head: &Commit,
        index: &Index,
    ) -> ChangeSet {
        let staged = index
            .added()
            .iter()
            .filter_map(|(path, staged_oid)| {
                Self::compare(workspace_files, path, staged_oid).map(|change| (path.clone(), change))
            });

        let tracked = head
            .files()
            .iter()
            .filter(|(path, _)| !index.is_staged(path))
            .filter_map(|(path, head_oid)| {
                Self::compare(workspace_files, path, head_oid).map(|change| (path.clone(), change))
            });

        staged.chain(tracked).collect()
    }

    fn compare(
        workspace_files: &BTreeMap<PathBuf, ObjectId>,
        path: &Path,
        expected: &ObjectId,
    ) -> Option<WorkspaceChangeType> {
        match workspace_files.get(path) {
            None => Some(WorkspaceChangeType::Deleted),
            Some(oid) if oid != expected => Some(WorkspaceChangeType::Modified),
            Some(_) => None,
        }
    }

    fn detect_untracked_files(
        workspace_files: &BTreeMap<PathBuf, ObjectId>,
        head: &Commit,
        index: &Index,
    ) -> FileSet {
        workspace_files
            .keys()
            .filter(|path| {
                let untracked = !head.tracks(path) && !index.is_staged_for_addition(path);
                untracked || index.is_staged_for_removal(path)
            })
            .cloned()
            .collect()
    }
}
