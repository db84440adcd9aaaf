//! Stateful stores of a repository
//!
//! - `database`: content-addressed blobs and commits
//! - `refs`: branch pointers and HEAD
//! - `index`: the staging area
//! - `workspace`: the working tree
//! - `remotes`: the remote registry and handles on remote repositories
//! - `repository`: composition root shared by every command

pub mod database;
pub mod index;
pub mod refs;
pub mod remotes;
pub mod repository;
pub mod workspace;
