//! Checkout migration
//!
//! A migration moves the workspace from the HEAD commit to a target commit:
//!
//! 1. every file of the target is written
//! 2. every file tracked by HEAD or staged for addition that the target does not
//!    track is deleted, and directories left empty are pruned
//!
//! Files neither tracked nor staged are never touched. Blob contents are loaded
//! while planning, so a broken object store fails before the workspace changes.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    Delete,
    Write,
}

/// Planned actions grouped by type, each path paired with the blob to write
pub type ActionsSet = BTreeMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, head: &Commit, index: &Index, target: &Commit) -> Self {
        Self {
            repository,
            actions: Self::plan_changes(head, index, target),
        }
    }

    pub fn plan_changes(head: &Commit, index: &Index, target: &Commit) -> ActionsSet {
        let writes = target
            .files()
            .iter()
            .map(|(path, oid)| (path.clone(), Some(oid.clone())))
            .collect::<Vec<_>>();

        let deletes = head
            .files()
            .keys()
            .chain(index.added().keys())
            .filter(|path| !target.tracks(path))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|path| (path.clone(), None))
            .collect::<Vec<_>>();

        BTreeMap::from([(ActionType::Delete, deletes), (ActionType::Write, writes)])
    }

    // Deletions go first so that a file replacing a directory (or the reverse) finds
    // the way clear.
    pub fn apply_changes(&self) -> anyhow::Result<()> {
        let contents = self.load_contents()?;
        let workspace = self.repository.workspace();

        for (path, _) in self.action_set(ActionType::Delete) {
            workspace.remove_file(path)?;
        }

        for (path, data) in contents {
            workspace.write_file(&path, &data)?;
        }

        tracing::debug!(
            written = self.action_set(ActionType::Write).len(),
            deleted = self.action_set(ActionType::Delete).len(),
            "applied checkout migration"
        );

        Ok(())
    }

    fn load_contents(&self) -> anyhow::Result<Vec<(PathBuf, Bytes)>> {
        let database = self.repository.database();

        self.action_set(ActionType::Write)
            .iter()
            .filter_map(|(path, oid)| oid.as_ref().map(|oid| (path, oid)))
            .map(|(path, oid)| Ok((path.clone(), database.load_blob_data(oid)?)))
            .collect()
    }

    fn action_set(&self, action: ActionType) -> &[(PathBuf, Option<ObjectId>)] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
