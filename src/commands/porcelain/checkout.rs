use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::{Commit, FileTree};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

impl Repository {
    /// Restore a file from the HEAD commit
    pub async fn checkout_file(&mut self, path: &str) -> anyhow::Result<()> {
        let (head_oid, _) = self.head_commit()?;

        self.restore_file(&head_oid, path)
    }

    /// Restore a file from the commit an ID prefix resolves to
    pub async fn checkout_file_at(&mut self, commit_prefix: &str, path: &str) -> anyhow::Result<()> {
        let commit_oid = self.database().find_commit(commit_prefix)?;

        self.restore_file(&commit_oid, path)
    }

    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        // a name that cannot be a branch is as absent as one that does not exist
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| TwigError::NoSuchBranch)?;
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or(TwigError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::AlreadyOnBranch.into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (head_oid, head_commit) = self.head_commit()?;
        if head_oid != target_oid {
            let target_commit = self.database().load_commit(&target_oid)?;
            self.migrate_working_tree(head_commit.tree(), target_commit.tree())?;
        }

        index.clear();
        index.write_updates()?;
        self.refs().set_head(&branch_name)?;

        tracing::info!(branch = %branch_name, commit = %target_oid.to_short_oid(), "switched branch");

        Ok(())
    }

    fn restore_file(&self, commit_oid: &ObjectId, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize_path(path);
        let commit = self.database().load_commit(commit_oid)?;
        let blob_oid = commit.blob_for(&path).ok_or(TwigError::NotInCommit)?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(&path, blob.content())
    }

    /// Make the working tree match `target`, refusing to clobber untracked files
    pub(crate) fn migrate_working_tree(
        &self,
        current: &FileTree,
        target: &FileTree,
    ) -> anyhow::Result<()> {
        let migration = Migration::plan(self.database(), self.workspace(), current, target)?;
        migration.apply_changes()
    }

    /// Move the working tree, staging area and current branch to another commit
    pub(crate) fn move_head_to(
        &self,
        index: &mut Index,
        head_commit: &Commit,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        let target_commit = self.database().load_commit(target_oid)?;
        self.migrate_working_tree(head_commit.tree(), target_commit.tree())?;

        index.clear();
        index.write_updates()?;
        self.refs().update_head(target_oid)
    }
}
