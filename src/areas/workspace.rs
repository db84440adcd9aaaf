use crate::REPOSITORY_DIR;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [REPOSITORY_DIR, ".", ".."];

/// The working tree: plain files addressed by `/`-separated relative paths
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Every plain file in the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_ignored(entry.file_name()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative_path(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Canonical form of a user-supplied relative path: `/`-separated, no `.` or empty components
    pub fn normalize_path(file_path: &str) -> String {
        file_path
            .split(['/', '\\'])
            .filter(|component| !component.is_empty() && *component != ".")
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.absolute_path(file_path).is_file()
    }

    /// Every plain file below a directory of the working tree, sorted
    ///
    /// Empty when `dir_path` is not a directory.
    pub fn files_under(&self, dir_path: &str) -> anyhow::Result<Vec<String>> {
        let absolute_path = self.absolute_path(dir_path);
        if !absolute_path.is_dir() {
            return Ok(vec![]);
        }

        let mut files = vec![];
        for entry in WalkDir::new(&absolute_path).min_depth(1) {
            let entry = entry
                .with_context(|| format!("Failed to list directory: {:?}", absolute_path))?;
            if entry.file_type().is_file()
                && let Some(relative_path) = self.relative_path(entry.path())
            {
                files.push(relative_path);
            }
        }
        files.sort();

        Ok(files)
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let absolute_path = self.absolute_path(file_path);
        let content = std::fs::read(&absolute_path)
            .with_context(|| format!("Failed to read file: {:?}", absolute_path))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Write a file, creating missing parent directories
    ///
    /// A directory standing where the file should go is replaced only when it
    /// holds no files.
    pub fn write_file(&self, file_path: &str, data: &[u8]) -> anyhow::Result<()> {
        let absolute_path = self.absolute_path(file_path);

        if absolute_path.is_dir() {
            let files = self.files_under(file_path)?;
            if !files.is_empty() {
                anyhow::bail!(
                    "Refusing to replace directory {:?} holding {}",
                    file_path,
                    files.join(", ")
                );
            }
            std::fs::remove_dir_all(&absolute_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }
        if let Some(parent) = absolute_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directories for {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&absolute_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;
        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file if present, then prune directories it leaves empty
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let absolute_path = self.absolute_path(file_path);
        if !absolute_path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&absolute_path)
            .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        self.prune_empty_parent_dirs(&absolute_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn absolute_path(&self, file_path: &str) -> PathBuf {
        file_path
            .split('/')
            .fold(self.path.to_path_buf(), |path, component| path.join(component))
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative_path = path.strip_prefix(self.path.as_ref()).ok()?;

        Some(
            relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
        )
    }

    fn is_ignored(name: &std::ffi::OsStr) -> bool {
        IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
    }
}
