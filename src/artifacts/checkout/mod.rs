//! Switching the working tree between snapshots
//!
//! Checkout and reset plan the whole migration, including the untracked-file
//! check, before touching the working tree.

pub mod migration;
