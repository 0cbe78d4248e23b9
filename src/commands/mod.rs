//! Command implementations
//!
//! - `porcelain`: the user-facing operations, one `impl Repository` block per command
//!
//! Every command validates its arguments and the repository state before it mutates
//! anything, and writes user-facing output to the repository writer.

pub mod porcelain;
