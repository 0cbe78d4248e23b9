use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::RepositoryError;
use std::path::Path;

impl Repository {
    /// Restore one file from a commit (HEAD when `revision` is `None`)
    ///
    /// The staging area is left alone.
    pub async fn checkout_file(&self, revision: Option<&str>, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let revision = revision.map(Revision::parse).unwrap_or(Revision::Head);
        let commit_id = revision.resolve(self)?;
        let commit = self.database().load_commit(&commit_id)?;

        let path = self.workspace().relative_path(Path::new(path))?;
        let blob_id = commit
            .blob_for(&path)
            .ok_or_else(|| RepositoryError::FileNotInCommit(path.clone()))?;

        let data = self.database().load_blob_data(blob_id)?;
        self.workspace().write_file(&path, &data)?;

        tracing::info!(commit = %commit_id, path = %path.display(), "restored file");
        Ok(())
    }

    /// Make another branch current and the workspace match its tip
    pub async fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch(name.to_string()))?;
        let target_id = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| RepositoryError::NoSuchBranch(name.to_string()))?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::NothingToDo.into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head) = self.head_commit()?;
        let target = self.database().load_commit(&target_id)?;

        let workspace_files = self.workspace().list_files()?;
        ConflictType::UntrackedPresent.check(&workspace_files, &head, &index, &target)?;

        Migration::new(self, &head, &index, &target).apply_changes()?;
        self.refs().set_current_branch(&branch_name)?;

        index.clear();
        index.write_updates()?;

        tracing::info!(branch = %branch_name, commit = %target_id, "checked out branch");
        Ok(())
    }
}
