use crate::areas::database::CommitCache;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::lca_finder::LCAFinder;
use crate::artifacts::merge::resolution::{Resolution, conflict_content};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

/// A per-path merge step with every blob it needs already loaded
enum MergeAction {
    Write { oid: ObjectId, data: Bytes },
    Remove,
    Conflict { data: Bytes },
}

impl Repository {
    /// Merge the tip of `name` into the current branch
    pub async fn merge(&self, name: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if !index.is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch(name.to_string()))?;
        let target_id = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| RepositoryError::NoSuchBranch(name.to_string()))?;

        let current_branch = self.refs().current_branch()?;
        if current_branch == branch_name {
            return Err(RepositoryError::SelfMerge.into());
        }

        let (head_id, head) = self.head_commit()?;
        let ancestor_id = self
            .find_latest_common_ancestor(&head_id, &target_id)?
            .ok_or(RepositoryError::NoCommonAncestor)?;

        if ancestor_id == target_id {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::AncestorAlready);
        }

        let target = self.database().load_commit(&target_id)?;
        let workspace_files = self.workspace().list_files()?;
        ConflictType::UntrackedOverwritten.check(&workspace_files, &head, &index, &target)?;

        if ancestor_id == head_id {
            Migration::new(self, &head, &index, &target).apply_changes()?;
            self.refs().update_head(target_id.clone())?;

            index.clear();
            index.write_updates()?;

            tracing::info!(branch = %branch_name, commit = %target_id, "fast-forwarded");
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForwarded(target_id));
        }

        let ancestor = self.database().load_commit(&ancestor_id)?;
        let actions = self.plan_merge(&ancestor, &head, &target)?;
        let conflicted = actions
            .iter()
            .any(|(_, action)| matches!(action, MergeAction::Conflict { .. }));

        self.apply_merge(actions, &mut index)?;

        let message = format!("Merged {branch_name} into {current_branch}.");
        let commit_id = self.write_commit(&message, Some(target_id), &mut index)?;

        tracing::info!(branch = %branch_name, commit = %commit_id, conflicted, "merged");
        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_id,
            conflicted,
        })
    }

    fn find_latest_common_ancestor(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let commit_cache = CommitCache::new();
        let finder = LCAFinder::new(|oid: &ObjectId| {
            commit_cache.get_or_load_slim_commit(self.database(), oid)
        });

        finder.find_latest_common_ancestor(source, target)
    }

    /// Resolve every path of the three snapshots and load the contents to write
    fn plan_merge(
        &self,
        ancestor: &Commit,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<Vec<(PathBuf, MergeAction)>> {
        let paths = ancestor
            .files()
            .keys()
            .chain(current.files().keys())
            .chain(target.files().keys())
            .collect::<BTreeSet<_>>();

        let mut actions = Vec::new();
        for path in paths {
            let resolution = Resolution::resolve(
                ancestor.blob_for(path),
                current.blob_for(path),
                target.blob_for(path),
            );
            tracing::debug!(path = %path.display(), ?resolution, "merge decision");

            let action = match resolution {
                Resolution::Unchanged => continue,
                Resolution::TakeTarget(oid) => MergeAction::Write {
                    data: self.database().load_blob_data(&oid)?,
                    oid,
                },
                Resolution::Remove => MergeAction::Remove,
                Resolution::Conflict { current, target } => {
                    let current = current
                        .map(|oid| self.database().load_blob_data(&oid))
                        .transpose()?;
                    let target = target
                        .map(|oid| self.database().load_blob_data(&oid))
                        .transpose()?;

                    MergeAction::Conflict {
                        data: conflict_content(current.as_deref(), target.as_deref()),
                    }
                }
            };

            actions.push((path.clone(), action));
        }

        Ok(actions)
    }

    fn apply_merge(
        &self,
        actions: Vec<(PathBuf, MergeAction)>,
        index: &mut Index,
    ) -> anyhow::Result<()> {
        for (path, action) in actions {
            match action {
                MergeAction::Write { oid, data } => {
                    self.workspace().write_file(&path, &data)?;
                    index.add(path, oid);
                }
                MergeAction::Remove => {
                    self.workspace().remove_file(&path)?;
                    index.remove(path);
                }
                MergeAction::Conflict { data } => {
                    self.workspace().write_file(&path, &data)?;
                    let oid = self.database().store(Blob::new(data))?;
                    index.add(path, oid);
                }
            }
        }

        Ok(())
    }
}
