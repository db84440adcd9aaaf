use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;

impl Repository {
    /// Fast-forward `branch` in the remote to the local HEAD commit
    ///
    /// The remote branch is created at the remote's HEAD commit first when it
    /// does not exist yet, so pushing a new branch still has to descend from
    /// the remote's current state.
    pub async fn push(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let remote = self.open_remote(remote_name)?;
        let branch_name = BranchName::try_parse(branch.to_string())?;

        let remote_oid = match remote.refs().read_branch(&branch_name)? {
            Some(oid) => oid,
            None => remote.refs().read_head()?,
        };

        let head_oid = self.refs().read_head()?;
        if !self.database().ancestors(&head_oid)?.contains(&remote_oid) {
            return Err(TwigError::PushNotFastForward).with_context(|| {
                format!(
                    "{}/{} at {} is not an ancestor of HEAD",
                    remote_name,
                    branch_name,
                    remote_oid.to_short_oid()
                )
            });
        }

        let mut transferred = 0;
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            for oid in self.database().list(object_type)? {
                if self.database().transfer(object_type, &oid, remote.database())? {
                    transferred += 1;
                }
            }
        }

        remote.refs().update_branch(&branch_name, &head_oid)?;
        tracing::info!(
            remote = remote_name,
            branch = %branch_name,
            commit = %head_oid.to_short_oid(),
            objects = transferred,
            "pushed"
        );

        Ok(())
    }
}
