use crate::areas::database::Database;
use crate::artifacts::log::LogEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;

/// Lists commits out of the object store
#[derive(new)]
pub struct RevList<'d> {
    database: &'d Database,
}

impl<'d> RevList<'d> {
    /// The primary-parent chain from `start`, newest first
    pub fn first_parent_history(&self, start: &ObjectId) -> anyhow::Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(start.clone());

        while let Some(oid) = next {
            let commit = self.database.load_commit(&oid)?;
            next = commit.parent().cloned();
            entries.push(LogEntry::new(oid, commit));
        }

        Ok(entries)
    }

    /// Every commit in the store, newest first with ties broken by ID
    pub fn all_commits(&self) -> anyhow::Result<Vec<LogEntry>> {
        let mut entries = self
            .database
            .list_objects()?
            .into_iter()
            .filter_map(|oid| match self.database.get_object_type(&oid) {
                Ok(ObjectType::Commit) => Some(
                    self.database
                        .load_commit(&oid)
                        .map(|commit| LogEntry::new(oid, commit)),
                ),
                Ok(_) => None,
                Err(error) => Some(Err(error)),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        entries.sort_by(|a, b| {
            b.commit
                .timestamp()
                .cmp(&a.commit.timestamp())
                .then_with(|| a.oid.cmp(&b.oid))
        });

        Ok(entries)
    }
}
