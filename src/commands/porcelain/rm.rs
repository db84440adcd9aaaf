use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::TwigError;

impl Repository {
    pub async fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize_path(path);

        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area from the disk
        index.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        let staged = index.staged_addition(&path).is_some();
        let tracked = head_commit.blob_for(&path).cloned();

        if !staged && tracked.is_none() {
            return Err(TwigError::NothingToRemove.into());
        }

        if staged {
            index.unstage(&path);
        }

        if let Some(tracked) = tracked {
            index.stage_removal(&path, tracked);
            index.write_updates()?;
            self.workspace().remove_file(&path)?;
        } else {
            index.write_updates()?;
        }

        Ok(())
    }
}
