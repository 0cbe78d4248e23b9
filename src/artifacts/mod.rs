//! Data structures and algorithms behind the porcelain commands
//!
//! - `branch`: branch names and revision parsing
//! - `checkout`: workspace migrations and untracked-file checks
//! - `core`: error taxonomy and the pager writer
//! - `index`: on-disk encoding of the staging area
//! - `log`: commit history traversal and rendering
//! - `objects`: blobs and commits
//! - `status`: workspace status inspection
//! - `merge`: common ancestor search and per-path resolution

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
