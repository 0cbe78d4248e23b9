//! Working tree status inspection
//!
//! Compares the workspace against the staging area and the HEAD commit.
//!
//! - `file_change`: kinds of unstaged workspace changes
//! - `status_info`: status computation and its result

pub mod file_change;
pub mod status_info;
