use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use std::path::Path;

impl Repository {
    /// Unstage a file and, if HEAD tracks it, stage its removal and delete it
    pub async fn rm(&self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self.workspace().relative_path(Path::new(path))?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head) = self.head_commit()?;
        let staged = index.is_staged_for_addition(&path);
        let tracked = head.tracks(&path);

        if !staged && !tracked {
            return Err(RepositoryError::NoReasonToRemove(path).into());
        }

        if staged {
            index.unstage(&path);
        }

        if tracked {
            self.workspace().remove_file(&path)?;
            index.remove(path.clone());
        }

        tracing::debug!(path = %path.display(), staged, tracked, "removed");
        index.write_updates()?;

        Ok(())
    }
}
