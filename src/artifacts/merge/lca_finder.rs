//! Latest common ancestor finder
//!
//! The search runs in two phases:
//!
//! 1. Walk every ancestor of the current tip (including the tip) and mark it as
//!    visited from the source side.
//! 2. Walk breadth-first from the target tip, primary parent before merge parent,
//!    and return the first commit already visited from the source side.
//!
//! On a history without merge commits this is the commit where the two primary-parent
//! chains first meet.
//!
//! ## Debug Logging
//!
//! Building with the `debug_merge` feature traces every visited commit and its state.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finds the latest common ancestor of two commits
///
/// The commit loader decouples the search from storage: the database-backed loader
/// goes through a `CommitCache`, tests use an in-memory graph.
pub struct LCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> LCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// The latest common ancestor of `source` (the current tip) and `target`
    ///
    /// Returns `None` when the histories share no commit.
    pub fn find_latest_common_ancestor(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();

        self.walk(source, |oid| {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_SOURCE) {
                return WalkStep::Skip;
            }
            *state |= VisitState::VISITED_FROM_SOURCE;
            WalkStep::Continue
        })?;

        let mut found = None;
        self.walk(target, |oid| {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_TARGET) {
                return WalkStep::Skip;
            }
            *state |= VisitState::VISITED_FROM_TARGET;
            debug_log!("Processing commit {}: state={}", oid, state);

            if state.contains(VisitState::VISITED_FROM_BOTH) {
                found = Some(oid.clone());
                WalkStep::Stop
            } else {
                WalkStep::Continue
            }
        })?;

        tracing::debug!(%source, %target, ancestor = ?found, "common ancestor search finished");
        Ok(found)
    }

    /// Breadth-first walk from `start`, primary parent before merge parent
    fn walk(
        &self,
        start: &ObjectId,
        mut visit: impl FnMut(&ObjectId) -> WalkStep,
    ) -> anyhow::Result<()> {
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(oid) = queue.pop_front() {
            match visit(&oid) {
                WalkStep::Stop => break,
                WalkStep::Skip => continue,
                WalkStep::Continue => {
                    let commit = (self.commit_loader)(&oid)?;
                    queue.extend(commit.parents);
                }
            }
        }

        Ok(())
    }
}

enum WalkStep {
    Continue,
    Skip,
    Stop,
}
