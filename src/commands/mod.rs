//! Command implementations
//!
//! - `porcelain`: local version control workflows (add, commit, checkout, merge, ...)
//! - `remote`: remote registration and object transfer (push, fetch, pull)

pub mod porcelain;
pub mod remote;
