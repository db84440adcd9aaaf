//! Working tree status inspection
//!
//! - `file_change`: kinds of unstaged changes
//! - `inspector`: per-path comparison of working tree, staging area and HEAD
//! - `status_info`: the five-section report

pub mod file_change;
pub mod inspector;
pub mod status_info;
