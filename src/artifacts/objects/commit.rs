//! Commit object
//!
//! Commits are full snapshots of the tracked files at a point in time.
//! They contain:
//! - Parent commit ID (absent only for the initial commit)
//! - Merge parent ID (present only for merge commits)
//! - Timestamp with timezone offset
//! - The tree: every tracked path mapped to its blob ID
//! - Commit message
//!
//! ## Format
//!
//! The canonical (hashed and stored) form:
//! ```text
//! parent <parent-sha>
//! merge-parent <merge-parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//! Parent lines are omitted when absent and file lines are sorted by path.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Timelike};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message of the bootstrap commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the wall clock for new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

/// Snapshot of tracked paths: path -> blob ID, kept sorted by path
pub type FileTree = BTreeMap<String, ObjectId>;

/// Slim representation of a commit
///
/// Contains only what graph traversals need: the parent edges.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// Primary parent first, then the merge parent
    pub parents: Vec<ObjectId>,
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    tree: FileTree,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        tree: FileTree,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            tree,
            parent,
            merge_parent,
        }
    }

    /// The bootstrap commit: no parents, empty tree, Unix epoch at `+0000`
    ///
    /// Every fresh repository therefore starts from the same commit ID.
    pub fn initial() -> Self {
        let epoch = DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset();

        Commit::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            epoch,
            FileTree::new(),
            None,
            None,
        )
    }

    /// Timestamp for a new commit on top of the given parents
    ///
    /// Uses `TWIG_COMMIT_DATE` when it parses, the local wall clock otherwise,
    /// and never goes earlier than any parent.
    pub fn next_timestamp(parents: &[&Commit]) -> DateTime<FixedOffset> {
        let now = std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset());
        // the canonical form stores whole seconds
        let now = now.with_nanosecond(0).unwrap_or(now);

        parents
            .iter()
            .map(|parent| parent.timestamp)
            .filter(|parent_timestamp| parent_timestamp > &now)
            .max()
            .unwrap_or(now)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// Primary parent followed by the merge parent, when present
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    /// Blob ID recorded for a path, if tracked
    pub fn blob_for(&self, path: &str) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    pub fn tracks(&self, path: &str) -> bool {
        self.tree.contains_key(path)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {}", parent));
        }
        if let Some(merge_parent) = &self.merge_parent {
            object_content.push(format!("merge-parent {}", merge_parent));
        }
        object_content.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, blob_oid) in &self.tree {
            object_content.push(format!("file {} {}", blob_oid, path));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        Ok(Bytes::from(object_content.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut tree = FileTree::new();

        for line in header.lines() {
            let (keyword, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {:?}", line))?;

            match keyword {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge-parent" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "timestamp" => timestamp = Some(parse_timestamp(value)?),
                "file" => {
                    let (blob_oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed file line")?;
                    tree.insert(path.to_string(), ObjectId::try_parse(blob_oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {}", keyword),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Ok(Self::new(
            message.to_string(),
            timestamp,
            tree,
            parent,
            merge_parent,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

/// Parse "<unix-seconds> <+hhmm>" back into a timestamp with offset
fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%s %z")
        .with_context(|| format!("Invalid commit object: malformed timestamp {:?}", value))
}
