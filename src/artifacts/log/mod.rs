//! Commit history listing
//!
//! - `rev_list`: history traversal (`log`) and store-wide enumeration (`global-log`)
//!
//! Every listed commit renders as:
//!
//! ```text
//! ===
//! commit <id>
//! Merge: <primary-7> <secondary-7>      (merge commits only)
//! Date: <Thu Jan 1 00:00:00 1970 +0000>
//! <message>
//!
//! ```

pub mod rev_list;

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use derive_new::new;

/// A commit together with its ID, as listed by `log` and `global-log`
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub commit: Commit,
}

impl LogEntry {
    pub fn render(&self) -> String {
        let mut lines = vec![
            "===".to_string(),
            format!("commit {}", self.oid.as_ref().yellow()),
        ];

        if self.commit.is_merge()
            && let (Some(parent), Some(merge_parent)) =
                (self.commit.parent(), self.commit.merge_parent())
        {
            lines.push(format!(
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            ));
        }

        lines.push(format!("Date: {}", self.commit.timestamp().readable()));
        lines.push(self.commit.message().to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}
