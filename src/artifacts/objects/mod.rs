//! Stored object types
//!
//! Every object lives in the object database under the SHA-1 digest of its identity:
//!
//! - **Blob**: raw file content
//! - **Commit**: a snapshot (path -> blob mapping) plus parents, merge flag, message and timestamp
//!
//! The on-disk encoding of an object is `<type> <size>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in binary format
pub const OBJECT_ID_BYTES: usize = OBJECT_ID_LENGTH / 2;
