use crate::areas::repository::Repository;
use crate::artifacts::log::LogEntry;
use crate::artifacts::log::rev_list::RevList;
use std::io::Write;

impl Repository {
    /// Show the primary-parent history of HEAD, newest first
    pub async fn log(&self) -> anyhow::Result<Vec<LogEntry>> {
        self.ensure_initialized()?;

        let head_oid = self.refs().read_head()?;
        let entries = RevList::new(self.database()).first_parent_history(&head_oid)?;

        self.show_log_entries(&entries)?;
        Ok(entries)
    }

    /// Show every commit ever made, newest first
    pub async fn global_log(&self) -> anyhow::Result<Vec<LogEntry>> {
        self.ensure_initialized()?;

        let entries = RevList::new(self.database()).all_commits()?;

        self.show_log_entries(&entries)?;
        Ok(entries)
    }

    fn show_log_entries(&self, entries: &[LogEntry]) -> anyhow::Result<()> {
        for entry in entries {
            writeln!(self.writer(), "{}", entry.render())?;
        }

        Ok(())
    }
}
