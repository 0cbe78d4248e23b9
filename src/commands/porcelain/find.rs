use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the IDs of all commits whose message is exactly `message`
    pub async fn find(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        self.ensure_initialized()?;

        let matches = RevList::new(self.database())
            .all_commits()?
            .into_iter()
            .filter(|entry| entry.commit.message() == message)
            .map(|entry| entry.oid)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        for oid in &matches {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(matches)
    }
}
