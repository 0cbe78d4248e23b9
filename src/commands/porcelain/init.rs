use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create `.gitlet` with the root commit on `master`
    ///
    /// Running it inside an existing repository only prints a notice.
    pub async fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "A Gitlet version-control system already exists in the current directory."
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        let initial_commit_id = self
            .database()
            .store(Commit::initial())
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .update_branch(&default_branch, initial_commit_id.clone())
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index
            .write_updates()
            .context("Failed to create .gitlet/index file")?;

        tracing::info!(
            path = %self.path().display(),
            commit = %initial_commit_id,
            "initialized repository"
        );

        Ok(())
    }
}
