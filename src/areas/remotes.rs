//! Remote registry and remote repository handles
//!
//! A remote is a name mapped to a filesystem path. The registry keeps one
//! file per remote under `.twig/remotes/`, holding the path as written by the
//! user. The path may point at the remote's metadata directory or at a
//! working tree containing one.

use crate::REPOSITORY_DIR;
use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct Remotes {
    /// Path to the registry directory (typically `.twig/remotes`)
    path: Box<Path>,
}

impl Remotes {
    pub fn add(&self, name: &str, remote_path: &str) -> anyhow::Result<()> {
        Self::validate_name(name)?;

        let entry_path = self.path.join(name);
        if entry_path.exists() {
            return Err(TwigError::RemoteExists)
                .with_context(|| format!("remote {} already registered", name));
        }

        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("failed to create remote registry at {:?}", self.path))?;
        std::fs::write(&entry_path, remote_path)
            .with_context(|| format!("failed to register remote {}", name))?;
        tracing::debug!(remote = name, path = remote_path, "registered remote");

        Ok(())
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let entry_path = self.path.join(name);
        if Self::validate_name(name).is_err() || !entry_path.is_file() {
            return Err(TwigError::NoSuchRemote)
                .with_context(|| format!("remote {} is not registered", name));
        }

        std::fs::remove_file(&entry_path)
            .with_context(|| format!("failed to unregister remote {}", name))
    }

    /// The registered path of a remote, if it is registered
    pub fn get(&self, name: &str) -> anyhow::Result<Option<PathBuf>> {
        let entry_path = self.path.join(name);
        if Self::validate_name(name).is_err() || !entry_path.is_file() {
            return Ok(None);
        }

        let remote_path = std::fs::read_to_string(&entry_path)
            .with_context(|| format!("failed to read remote {}", name))?;

        Ok(Some(PathBuf::from(remote_path.trim_end_matches(['\r', '\n']))))
    }

    /// Remote names become the first component of remote-tracking branches
    fn validate_name(name: &str) -> anyhow::Result<()> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if valid {
            Ok(())
        } else {
            Err(TwigError::BadArgs).with_context(|| format!("invalid remote name {:?}", name))
        }
    }
}

/// Object store and references of another repository on the local filesystem
#[derive(Debug)]
pub struct RemoteRepository {
    database: Database,
    refs: Refs,
}

impl RemoteRepository {
    /// Open the repository a registered path points to
    ///
    /// Relative paths are resolved against `base`, the local working tree.
    pub fn open(base: &Path, registered_path: &Path) -> anyhow::Result<Self> {
        let registered_path = if registered_path.is_absolute() {
            registered_path.to_path_buf()
        } else {
            base.join(registered_path)
        };

        let metadata_path = [
            registered_path.clone(),
            registered_path.join(REPOSITORY_DIR),
        ]
        .into_iter()
        .find(|candidate| candidate.join("HEAD").is_file() && candidate.join("objects").is_dir());

        match metadata_path {
            Some(metadata_path) => Ok(RemoteRepository {
                database: Database::new(metadata_path.join("objects").into_boxed_path()),
                refs: Refs::new(metadata_path.into_boxed_path()),
            }),
            None => Err(TwigError::RemoteMissing)
                .with_context(|| format!("no repository at {:?}", registered_path)),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
