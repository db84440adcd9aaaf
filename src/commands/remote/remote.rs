use crate::areas::remotes::RemoteRepository;
use crate::areas::repository::Repository;
use crate::errors::TwigError;
use anyhow::Context;

impl Repository {
    pub async fn add_remote(&mut self, name: &str, path: &str) -> anyhow::Result<()> {
        self.remotes().add(name, path)
    }

    pub async fn rm_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.remotes().remove(name)
    }

    /// Open a registered remote; an unregistered name has no directory to find
    pub(crate) fn open_remote(&self, name: &str) -> anyhow::Result<RemoteRepository> {
        let remote_path = self
            .remotes()
            .get(name)?
            .ok_or(TwigError::RemoteMissing)
            .with_context(|| format!("remote {} is not registered", name))?;

        RemoteRepository::open(self.path(), &remote_path)
    }
}
