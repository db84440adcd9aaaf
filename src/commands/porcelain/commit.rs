use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area from the disk
        index.rehydrate()?;

        if index.is_empty() {
            return Err(TwigError::NoChanges.into());
        }

        self.write_commit(&mut index, message.to_string(), None)?;

        Ok(())
    }

    /// Record HEAD's tree overlaid with the staging area as a new commit
    ///
    /// Clears the staging area and advances the current branch, in that order.
    pub(crate) fn write_commit(
        &self,
        index: &mut Index,
        message: String,
        merge_parent: Option<(ObjectId, Commit)>,
    ) -> anyhow::Result<ObjectId> {
        let (head_oid, head_commit) = self.head_commit()?;

        let mut tree = head_commit.tree().clone();
        for (path, oid) in index.additions() {
            tree.insert(path.clone(), oid.clone());
        }
        for path in index.removals().keys() {
            tree.remove(path);
        }

        let parents = std::iter::once(&head_commit)
            .chain(merge_parent.as_ref().map(|(_, commit)| commit))
            .collect::<Vec<_>>();
        let timestamp = Commit::next_timestamp(&parents);

        let commit = Commit::new(
            message,
            timestamp,
            tree,
            Some(head_oid),
            merge_parent.map(|(oid, _)| oid),
        );
        let commit_oid = self.database().store(&commit)?;

        index.clear();
        index.write_updates()?;
        self.refs().update_head(&commit_oid)?;

        tracing::info!(commit = %commit_oid.to_short_oid(), files = commit.tree().len(), "created commit");

        Ok(commit_oid)
    }
}
