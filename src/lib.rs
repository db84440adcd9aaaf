//! twig: a small, local-first snapshot-and-pointer version control system
//!
//! - `areas`: stateful stores (objects, references, staging, working tree, remotes)
//! - `artifacts`: object types and the algorithms operating on them
//! - `commands`: user-facing operations, each implemented on `Repository`
//! - `errors`: the logical error taxonomy reported to users

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the repository metadata directory inside a working tree
pub const REPOSITORY_DIR: &str = ".twig";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
