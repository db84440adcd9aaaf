//! Data types and the algorithms operating on them
//!
//! - `objects`: object IDs, blobs, commits and their serialization
//! - `branch`: validated branch names
//! - `checkout`: untracked-file check and working tree migration
//! - `merge`: split point discovery, per-file resolution and conflict rendering
//! - `status`: the status report
//! - `log`: history traversal and log entries

pub mod branch;
pub mod checkout;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
