//! Synchronization with repositories on the local filesystem
//!
//! - `remote`: register and unregister remotes (`add-remote`, `rm-remote`)
//! - `push`: fast-forward a remote branch to HEAD
//! - `fetch`: copy a remote branch into `<remote>/<branch>`
//! - `pull`: fetch, then merge the remote-tracking branch

pub mod fetch;
pub mod pull;
pub mod push;
pub mod remote;
