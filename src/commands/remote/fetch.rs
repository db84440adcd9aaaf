use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;

impl Repository {
    /// Copy a remote branch's history into the local store as `<remote>/<branch>`
    pub async fn fetch(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let remote = self.open_remote(remote_name)?;

        let branch_name = BranchName::try_parse(branch.to_string())
            .map_err(|_| TwigError::NoSuchRemoteBranch)?;
        let remote_oid = remote
            .refs()
            .read_branch(&branch_name)?
            .ok_or(TwigError::NoSuchRemoteBranch)
            .with_context(|| format!("{} has no branch {}", remote_name, branch_name))?;

        let mut transferred = 0;
        for commit_oid in remote.database().ancestors(&remote_oid)? {
            let commit = remote.database().load_commit(&commit_oid)?;

            for blob_oid in commit.tree().values() {
                if remote
                    .database()
                    .transfer(ObjectType::Blob, blob_oid, self.database())?
                {
                    transferred += 1;
                }
            }
            // blobs first so that a stored commit never references a missing blob
            if remote
                .database()
                .transfer(ObjectType::Commit, &commit_oid, self.database())?
            {
                transferred += 1;
            }
        }

        let tracking_branch = BranchName::remote_tracking(remote_name, &branch_name)?;
        self.refs().update_branch(&tracking_branch, &remote_oid)?;
        tracing::info!(
            branch = %tracking_branch,
            commit = %remote_oid.to_short_oid(),
            objects = transferred,
            "fetched"
        );

        Ok(())
    }
}
