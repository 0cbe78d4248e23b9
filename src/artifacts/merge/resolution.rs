//! Per-path merge decisions
//!
//! Each path present in the ancestor, current or target snapshot is resolved by
//! comparing the three blob IDs, first matching row wins (`-` is absent):
//!
//! | ancestor | current | target | result                           |
//! |----------|---------|--------|----------------------------------|
//! | -        | any     | Y      | take target                      |
//! | X        | X       | Y      | take target                      |
//! | X        | any     | X      | unchanged when current is X or - |
//! | X        | any     | Y      | conflict                         |
//! | X        | Y       | -      | conflict, empty target side      |
//! | X        | X       | -      | remove                           |
//! | other    |         |        | unchanged                        |
//!
//! A path both sides changed to the same content still conflicts.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

const CONFLICT_START: &str = "<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &str = "=======\n";
const CONFLICT_END: &str = ">>>>>>>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Keep whatever the current branch has
    Unchanged,
    /// Write the target's blob and stage it
    TakeTarget(ObjectId),
    /// Stage the path for removal
    Remove,
    /// The sides diverged from the ancestor; a missing side renders empty
    Conflict {
        current: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

impl Resolution {
    pub fn resolve(
        ancestor: Option<&ObjectId>,
        current: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> Self {
        match (ancestor, current, target) {
            (None, _, Some(target)) => Resolution::TakeTarget(target.clone()),
            (Some(ancestor), Some(current), Some(target)) if ancestor == current => {
                if ancestor == target {
                    Resolution::Unchanged
                } else {
                    Resolution::TakeTarget(target.clone())
                }
            }
            (Some(ancestor), None, Some(target)) if ancestor == target => Resolution::Unchanged,
            (Some(_), current, Some(target)) => Resolution::Conflict {
                current: current.cloned(),
                target: Some(target.clone()),
            },
            (Some(ancestor), Some(current), None) if ancestor == current => Resolution::Remove,
            (Some(_), Some(current), None) => Resolution::Conflict {
                current: Some(current.clone()),
                target: None,
            },
            _ => Resolution::Unchanged,
        }
    }
}

/// Render a conflicted file; a missing side renders as empty
pub fn conflict_content(current: Option<&[u8]>, target: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let target = target.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CONFLICT_START.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + target.len()
            + CONFLICT_END.len(),
    );
    content.extend_from_slice(CONFLICT_START.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(target);
    content.extend_from_slice(CONFLICT_END.as_bytes());

    content.into()
}
