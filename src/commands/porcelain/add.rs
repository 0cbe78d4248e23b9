use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::object::Object;
use std::path::Path;

impl Repository {
    /// Stage the current content of a file
    ///
    /// Content identical to the HEAD version cancels any pending change instead.
    pub async fn add(&self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self.workspace().relative_path(Path::new(path))?;
        if !self.workspace().file_exists(&path) {
            return Err(RepositoryError::FileNotFound(path).into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head) = self.head_commit()?;
        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id()?;

        if head.blob_for(&path) == Some(&blob_id) {
            index.unstage(&path);
            tracing::debug!(path = %path.display(), "content matches HEAD, unstaged");
        } else {
            self.database().store(blob)?;
            tracing::debug!(path = %path.display(), oid = %blob_id, "staged for addition");
            index.add(path, blob_id);
        }

        index.write_updates()?;

        Ok(())
    }
}
