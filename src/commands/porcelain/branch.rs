use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::TwigError;

impl Repository {
    pub async fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    pub async fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| TwigError::BranchNotFound)?;

        if !self.refs().branch_exists(&branch_name) {
            return Err(TwigError::BranchNotFound.into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::CannotRemoveCurrent.into());
        }

        let oid = self.refs().delete_branch(&branch_name)?;
        tracing::info!(branch = %branch_name, commit = %oid.to_short_oid(), "deleted branch");

        Ok(())
    }
}
