use crate::areas::repository::Repository;

impl Repository {
    pub async fn reset(&mut self, commit_prefix: &str) -> anyhow::Result<()> {
        let target_oid = self.database().find_commit(commit_prefix)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        self.move_head_to(&mut index, &head_commit, &target_oid)?;

        tracing::info!(commit = %target_oid.to_short_oid(), "reset current branch");

        Ok(())
    }
}
