//! User-facing commands
//!
//! Each command is an `async fn` on `Repository` in its own module:
//!
//! - `init`: create the metadata directory and the initial commit
//! - `add`, `rm`: stage additions and removals
//! - `commit`: snapshot HEAD overlaid with the staging area
//! - `status`: branches, staging and working tree changes
//! - `log`, `global-log`, `find`: history queries
//! - `branch`, `rm-branch`: create and delete branches
//! - `checkout`, `reset`: restore files or move HEAD
//! - `merge`: three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
