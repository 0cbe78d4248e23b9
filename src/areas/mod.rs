//! On-disk state of a repository
//!
//! - `database`: content-addressable store for blobs and commits
//! - `index`: staging area of pending additions and removals
//! - `refs`: branch pointers and HEAD
//! - `repository`: the handle tying the areas together
//! - `workspace`: working directory file system operations

pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
