use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of the three-way comparison for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// HEAD's version (or HEAD's absence) stands
    KeepHead,
    /// Write the other branch's blob and stage it
    TakeOther(ObjectId),
    /// Remove the file HEAD still has unchanged since the split point
    Delete(ObjectId),
    /// Both sides changed the path differently
    Conflict {
        head: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl Resolution {
    /// Resolve one path given its blob in the split point, HEAD and the other commit
    ///
    /// "Changed" means the blob differs from the split point, including
    /// appearing or disappearing.
    pub fn resolve(
        split: Option<&ObjectId>,
        head: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        let head_changed = head != split;
        let other_changed = other != split;

        match (head_changed, other_changed) {
            (_, false) => Resolution::KeepHead,
            (false, true) => match (other, head) {
                (Some(other), _) => Resolution::TakeOther(other.clone()),
                (None, Some(head)) => Resolution::Delete(head.clone()),
                (None, None) => Resolution::KeepHead,
            },
            (true, true) if head == other => Resolution::KeepHead,
            (true, true) => Resolution::Conflict {
                head: head.cloned(),
                other: other.cloned(),
            },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Resolution::Conflict { .. })
    }
}

/// Every path whose merge result differs from HEAD, sorted by path
pub fn plan_merge(
    split: &FileTree,
    head: &FileTree,
    other: &FileTree,
) -> BTreeMap<String, Resolution> {
    split
        .keys()
        .chain(head.keys())
        .chain(other.keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter_map(|path| {
            match Resolution::resolve(split.get(path), head.get(path), other.get(path)) {
                Resolution::KeepHead => None,
                resolution => Some((path.clone(), resolution)),
            }
        })
        .collect()
}
