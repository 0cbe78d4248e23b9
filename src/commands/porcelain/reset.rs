use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Move the current branch to a commit and make the workspace match it
    pub async fn reset(&self, revision: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let target_id = Revision::parse(revision).resolve(self)?;
        let target = self.database().load_commit(&target_id)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head) = self.head_commit()?;

        let workspace_files = self.workspace().list_files()?;
        ConflictType::UntrackedOverwritten.check(&workspace_files, &head, &index, &target)?;

        Migration::new(self, &head, &index, &target).apply_changes()?;
        self.refs().update_head(target_id.clone())?;

        index.clear();
        index.write_updates()?;

        tracing::info!(commit = %target_id, "reset current branch");
        Ok(target_id)
    }
}
