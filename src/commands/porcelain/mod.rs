//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: create a repository with its root commit
//! - `add`, `rm`: stage files for addition or removal
//! - `commit`: record the staged snapshot
//! - `log`, `global-log`, `find`: inspect history
//! - `status`: show branches, staged changes and workspace changes
//! - `checkout`: switch branches or restore single files
//! - `branch`, `rm-branch`: create or delete branch pointers
//! - `reset`: move the current branch to another commit
//! - `merge`: merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
