//! Split point discovery for three-way merges
//!
//! The split point of HEAD and another commit is their lowest common ancestor
//! in the DAG formed by both parent edges:
//!
//! 1. Collect every ancestor of the other commit (itself included).
//! 2. Walk breadth-first from HEAD, enqueueing the primary parent before the
//!    merge parent.
//! 3. The first commit dequeued that is an ancestor of the other commit is
//!    the split point.
//!
//! When several lowest common ancestors exist (criss-cross histories), the one
//! closest to HEAD by breadth-first distance wins, so the result then depends
//! on argument order. With a unique lowest common ancestor it does not.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = SplitPointFinder::new(|oid| {
//!     commit_cache.get_or_load_slim_commit(database, oid)
//! });
//!
//! let split_point = finder.find_split_point(&head_oid, &other_oid)?;
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Finds the split point between two commits
///
/// Generic over a commit loader so the traversal works against the on-disk
/// object store as well as in-memory graphs.
#[derive(Debug, Clone)]
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `start` through both parent edges, `start` included
    pub fn ancestors(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::new();
        let mut work = vec![start.clone()];

        while let Some(oid) = work.pop() {
            if ancestors.contains(&oid) {
                continue;
            }

            let commit = (self.commit_loader)(&oid)?;
            work.extend(
                commit
                    .parents
                    .into_iter()
                    .filter(|parent| !ancestors.contains(parent)),
            );
            ancestors.insert(oid);
        }

        Ok(ancestors)
    }

    /// The split point of `head` and `other`, or `None` for disjoint histories
    pub fn find_split_point(
        &self,
        head: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let other_ancestors = self.ancestors(other)?;
        tracing::debug!(
            head = %head.to_short_oid(),
            other = %other.to_short_oid(),
            ancestors = other_ancestors.len(),
            "collected ancestors of merge target"
        );

        let mut visited = HashSet::from([head.clone()]);
        let mut queue = VecDeque::from([head.clone()]);

        while let Some(oid) = queue.pop_front() {
            if other_ancestors.contains(&oid) {
                tracing::debug!(split = %oid.to_short_oid(), "found split point");
                return Ok(Some(oid));
            }

            let commit = (self.commit_loader)(&oid)?;
            for parent in commit.parents {
                if visited.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(None)
    }
}
