use crate::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.metadata_path().exists() {
            return Err(TwigError::AlreadyInitialized)
                .with_context(|| format!("{} already exists", self.metadata_path().display()));
        }

        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            fs::create_dir_all(self.database().kind_path(object_type))
                .context("Failed to create .twig/objects directory")?;
        }

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        {
            let index = self.index();
            let index = index.lock().await;
            for staging_dir in ["additions", "removals"] {
                fs::create_dir_all(index.path().join(staging_dir))
                    .context("Failed to create .twig/staging directory")?;
            }
        }

        let initial_oid = self.database().store(&Commit::initial())?;
        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().update_branch(&default_branch, &initial_oid)?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        tracing::info!(path = %self.path().display(), "initialized repository");

        Ok(())
    }
}
