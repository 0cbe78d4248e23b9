//! Materializing commits onto the working directory
//!
//! Switching to another commit happens in two steps:
//! - detect untracked files that the switch would clobber, before touching anything
//! - plan and apply the file writes and deletions that make the workspace match the target
//!
//! Single files are restored directly through the workspace.

pub mod conflict;
pub mod migration;
