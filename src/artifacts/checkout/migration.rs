//! Working tree migration between two snapshots
//!
//! Moving the working tree from the current commit to a target commit:
//!
//! 1. Refuse if an untracked working file would be overwritten
//! 2. Write every file of the target tree
//! 3. Delete files tracked by the current tree but absent from the target
//!
//! All checks run before anything is written.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};

/// Type of file system action required for checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionType {
    /// Create a file the current tree does not track
    Add(ObjectId),
    /// Rewrite a file the current tree tracks
    Modify(ObjectId),
    /// Delete a file only the current tree tracks
    Delete,
}

/// Untracked working files that materializing `target` would overwrite or remove
///
/// For every target path the current tree does not track, this reports:
///
/// - an untracked file at the path itself
/// - untracked files inside a directory standing at the path
/// - an untracked file standing where one of the path's parent directories goes
pub fn untracked_in_the_way(
    workspace: &Workspace,
    current: &FileTree,
    target: &FileTree,
) -> anyhow::Result<Vec<String>> {
    let mut in_the_way = BTreeSet::new();

    for path in target.keys().filter(|path| !current.contains_key(*path)) {
        if workspace.exists(path) {
            in_the_way.insert(path.clone());
        }

        in_the_way.extend(
            workspace
                .files_under(path)?
                .into_iter()
                .filter(|file| !current.contains_key(file)),
        );

        in_the_way.extend(
            parent_dirs(path)
                .filter(|dir| !current.contains_key(*dir) && workspace.exists(dir))
                .map(str::to_string),
        );
    }

    Ok(in_the_way.into_iter().collect())
}

/// `a/b/c.txt` yields `a` then `a/b`
fn parent_dirs(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(index, _)| &path[..index])
}

/// Fail with `UntrackedConflict` if materializing `target` would clobber untracked files
pub fn check_untracked(
    workspace: &Workspace,
    current: &FileTree,
    target: &FileTree,
) -> anyhow::Result<()> {
    let untracked = untracked_in_the_way(workspace, current, target)?;

    if untracked.is_empty() {
        Ok(())
    } else {
        Err(TwigError::UntrackedConflict)
            .with_context(|| format!("untracked files in the way: {}", untracked.join(", ")))
    }
}

/// Planned working tree changes from one snapshot to another
pub struct Migration<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    actions: BTreeMap<String, ActionType>,
}

impl<'r> Migration<'r> {
    /// Plan the migration, failing before any change if untracked files are in the way
    pub fn plan(
        database: &'r Database,
        workspace: &'r Workspace,
        current: &FileTree,
        target: &FileTree,
    ) -> anyhow::Result<Self> {
        check_untracked(workspace, current, target)?;

        let mut actions = target
            .iter()
            .map(|(path, oid)| {
                let action = if current.contains_key(path) {
                    ActionType::Modify(oid.clone())
                } else {
                    ActionType::Add(oid.clone())
                };
                (path.clone(), action)
            })
            .collect::<BTreeMap<_, _>>();

        actions.extend(
            current
                .keys()
                .filter(|path| !target.contains_key(*path))
                .map(|path| (path.clone(), ActionType::Delete)),
        );

        Ok(Self {
            database,
            workspace,
            actions,
        })
    }

    pub fn actions(&self) -> &BTreeMap<String, ActionType> {
        &self.actions
    }

    // Deletions go first so that a file replacing a directory finds the path free
    pub fn apply_changes(&self) -> anyhow::Result<()> {
        for (path, action) in &self.actions {
            if *action == ActionType::Delete {
                self.workspace.remove_file(path)?;
            }
        }

        for (path, action) in &self.actions {
            match action {
                ActionType::Add(oid) | ActionType::Modify(oid) => {
                    let blob = self.database.load_blob(oid)?;
                    self.workspace.write_file(path, blob.content())?;
                }
                ActionType::Delete => {}
            }
        }

        tracing::debug!(changes = self.actions.len(), "applied working tree migration");

        Ok(())
    }
}
