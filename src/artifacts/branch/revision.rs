use crate::areas::repository::Repository;
use crate::artifacts::branch::{HEAD_REF_NAME, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;

/// A commit-ish argument: `HEAD` (or its alias `@`), a full commit ID, or a unique
/// prefix of one
///
/// Branch names are deliberately not accepted; commands that take a branch say so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    CommitId(String),
}

impl Revision {
    pub fn parse(revision: &str) -> Self {
        let revision = REF_ALIASES.get(revision).copied().unwrap_or(revision);

        if revision == HEAD_REF_NAME {
            Revision::Head
        } else {
            Revision::CommitId(revision.to_string())
        }
    }

    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository.refs().read_head(),
            Revision::CommitId(prefix) => repository.database().resolve_commit_prefix(prefix),
        }
    }
}
