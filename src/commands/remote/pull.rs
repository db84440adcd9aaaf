use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    pub async fn pull(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        self.fetch(remote_name, branch).await?;

        let branch_name = BranchName::try_parse(branch.to_string())?;
        let tracking_branch = BranchName::remote_tracking(remote_name, &branch_name)?;

        self.merge(tracking_branch.as_ref()).await
    }
}
