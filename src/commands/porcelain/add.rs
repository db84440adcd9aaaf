use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::Object;
use crate::errors::TwigError;

impl Repository {
    pub async fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize_path(path);
        if !self.workspace().exists(&path) {
            return Err(TwigError::FileMissing.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area from the disk
        index.rehydrate()?;

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id()?;
        let (_, head_commit) = self.head_commit()?;

        if head_commit.blob_for(&path) == Some(&blob_id) {
            // identical to HEAD: nothing to record, cancel whatever was pending
            index.unstage(&path);
        } else {
            self.database().store(&blob)?;
            index.stage_addition(&path, blob_id);
        }

        index.write_updates()?;

        Ok(())
    }
}
