//! Three-way merge
//!
//! - `split_finder`: lowest common ancestor discovery over both parent edges
//! - `resolution`: per-path decision between split point, HEAD and the other commit
//! - `conflict`: conflict marker rendering

pub mod conflict;
pub mod resolution;
pub mod split_finder;
