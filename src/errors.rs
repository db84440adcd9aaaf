//! Logical errors of the version control system
//!
//! Every variant is reported to the user as a single line on stdout and the
//! process still exits successfully. Anything that is not a `TwigError`
//! (I/O failures, corrupt objects) is an operational failure instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TwigError {
    #[error("Please enter a command.")]
    NoCommand,

    #[error("No command with that name exists.")]
    UnknownCommand,

    #[error("Not in an initialized Twig directory.")]
    NotInitialized,

    #[error("A Twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Incorrect operands.")]
    BadArgs,

    #[error("File does not exist.")]
    FileMissing,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NoChanges,

    /// Raised by checkout, where the wording differs from the other branch lookups
    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Invalid branch name.")]
    InvalidBranchName,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("File does not exist in that commit.")]
    NotInCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Commit id prefix is ambiguous.")]
    AmbiguousCommit,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedConflict,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("A remote with that name already exists.")]
    RemoteExists,

    #[error("A remote with that name does not exist.")]
    NoSuchRemote,

    #[error("Remote directory not found.")]
    RemoteMissing,

    #[error("That remote does not have that branch.")]
    NoSuchRemoteBranch,

    #[error("Please pull down remote changes before pushing.")]
    PushNotFastForward,
}

impl TwigError {
    /// Find the logical error inside an `anyhow` chain, if there is one
    pub fn find(error: &anyhow::Error) -> Option<&TwigError> {
        error.chain().find_map(|cause| cause.downcast_ref::<TwigError>())
    }
}
