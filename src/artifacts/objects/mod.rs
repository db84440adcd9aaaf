//! Object types and operations
//!
//! Two kinds of immutable objects are stored, both identified by SHA-1:
//!
//! - **Blob**: raw file content
//! - **Commit**: a full snapshot (path -> blob mapping) with message, timestamp and parents
//!
//! Objects carry no type header: a blob's identity is the digest of its bytes,
//! a commit's identity is the digest of its canonical serialization.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object ID
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
