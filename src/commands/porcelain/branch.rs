use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Create a branch at HEAD without switching to it
    pub async fn branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_id = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, head_id.clone())?;

        tracing::info!(branch = %branch_name, commit = %head_id, "created branch");
        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the store
    pub async fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch(name.to_string()))?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::CannotRemoveCurrent.into());
        }

        let oid = self.refs().delete_branch(&branch_name)?;

        tracing::info!(branch = %branch_name, commit = %oid, "deleted branch");
        Ok(())
    }
}
