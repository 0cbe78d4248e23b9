//! Three-way merge
//!
//! - `lca_finder`: finds the latest common ancestor of two commits
//! - `resolution`: decides the fate of each path and renders conflict files

pub mod lca_finder;
pub mod resolution;

use crate::artifacts::objects::object_id::ObjectId;

/// What a merge did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already contained in the current one
    AncestorAlready,
    /// The current branch was moved to the given branch's tip
    FastForwarded(ObjectId),
    /// A merge commit was created
    Merged { commit: ObjectId, conflicted: bool },
}
