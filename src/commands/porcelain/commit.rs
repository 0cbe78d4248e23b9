use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{Commit, Timestamp};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub async fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        self.write_commit(message, None, &mut index)
    }

    /// Record the staged snapshot on top of HEAD and advance the current branch
    ///
    /// A merge parent makes this a merge commit, which may have nothing staged.
    pub(crate) fn write_commit(
        &self,
        message: &str,
        merge_parent: Option<ObjectId>,
        index: &mut Index,
    ) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }
        if index.is_empty() && merge_parent.is_none() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let (head_oid, head) = self.head_commit()?;

        let mut files = head.files().clone();
        files.extend(
            index
                .added()
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );
        for path in index.removed() {
            files.remove(path);
        }

        let commit = Commit::new(
            message.to_string(),
            Some(head_oid),
            merge_parent,
            files,
            Timestamp::load_from_env(),
        );
        let commit_id = self.database().store(commit)?;
        self.refs().update_head(commit_id.clone())?;

        index.clear();
        index.write_updates()?;

        tracing::info!(commit = %commit_id, summary = message, "created commit");
        Ok(commit_id)
    }
}
