use crate::areas::database::CommitCache;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::check_untracked;
use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::merge::resolution::{Resolution, plan_merge};
use crate::artifacts::merge::split_finder::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

impl Repository {
    pub async fn merge(&mut self, target: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(target.to_string())
            .map_err(|_| TwigError::BranchNotFound)?;
        let merge_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or(TwigError::BranchNotFound)?;

        let current_branch = self.refs().current_branch()?;
        if current_branch == branch_name {
            return Err(TwigError::SelfMerge.into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if !index.is_empty() {
            return Err(TwigError::UncommittedChanges.into());
        }

        let (head_oid, head_commit) = self.head_commit()?;

        let split_oid = {
            let commit_cache = CommitCache::new();
            let database = self.database();
            let split_point_finder = SplitPointFinder::new(|oid| {
                commit_cache.get_or_load_slim_commit(database, oid)
            });

            split_point_finder.find_split_point(&head_oid, &merge_oid)?
        };

        if split_oid.as_ref() == Some(&merge_oid) {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_oid.as_ref() == Some(&head_oid) {
            self.move_head_to(&mut index, &head_commit, &merge_oid)?;
            tracing::info!(
                branch = %current_branch,
                commit = %merge_oid.to_short_oid(),
                "fast-forwarded"
            );
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let merge_commit = self.database().load_commit(&merge_oid)?;
        let split_tree = match &split_oid {
            Some(split_oid) => self.database().load_commit(split_oid)?.tree().clone(),
            // unrelated histories merge against an empty base
            None => FileTree::new(),
        };

        check_untracked(self.workspace(), head_commit.tree(), merge_commit.tree())?;

        let plan = plan_merge(&split_tree, head_commit.tree(), merge_commit.tree());
        let has_conflicts = plan.values().any(Resolution::is_conflict);
        tracing::debug!(
            split = ?split_oid.as_ref().map(ObjectId::to_short_oid),
            paths = plan.len(),
            conflicts = has_conflicts,
            "planned three-way merge"
        );

        for (path, resolution) in &plan {
            self.apply_resolution(&mut index, path, resolution)?;
        }

        let message = format!("Merged {} into {}.", branch_name, current_branch);
        self.write_commit(&mut index, message, Some((merge_oid, merge_commit)))?;

        if has_conflicts {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn apply_resolution(
        &self,
        index: &mut Index,
        path: &str,
        resolution: &Resolution,
    ) -> anyhow::Result<()> {
        match resolution {
            Resolution::KeepHead => {}
            Resolution::TakeOther(oid) => {
                let blob = self.database().load_blob(oid)?;
                self.workspace().write_file(path, blob.content())?;
                index.stage_addition(path, oid.clone());
            }
            Resolution::Delete(oid) => {
                self.workspace().remove_file(path)?;
                index.stage_removal(path, oid.clone());
            }
            Resolution::Conflict { head, other } => {
                let head = self.load_side(head.as_ref())?;
                let other = self.load_side(other.as_ref())?;
                let content = render_conflict(
                    head.as_ref().map(|blob| &blob.content()[..]),
                    other.as_ref().map(|blob| &blob.content()[..]),
                );

                self.workspace().write_file(path, &content)?;
                let oid = self.database().store(&Blob::new(content))?;
                index.stage_addition(path, oid);
            }
        }

        Ok(())
    }

    fn load_side(&self, oid: Option<&ObjectId>) -> anyhow::Result<Option<Blob>> {
        oid.map(|oid| self.database().load_blob(oid)).transpose()
    }
}
