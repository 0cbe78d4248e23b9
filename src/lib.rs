//! A small, single-user version-control engine.
//!
//! The crate is split into three layers:
//!
//! - `areas`: on-disk state of a repository (object database, staging index, refs, workspace)
//! - `artifacts`: data structures and algorithms (objects, checkout, merge, status, log)
//! - `commands`: the porcelain operations, one `impl Repository` block per command

pub mod areas;
pub mod artifacts;
pub mod commands;
