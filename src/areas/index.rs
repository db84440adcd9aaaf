//! Staging area
//!
//! Two disjoint mappings queued for the next commit:
//! - `additions`: path -> blob ID of the content to record
//! - `removals`: path -> blob ID the path had in HEAD when its removal was requested
//!
//! ## File Format
//!
//! Every entry is one file under `additions/` or `removals/`, named after the
//! SHA-1 of its path and containing `<blob-id> <path>`. Hashing the path keeps
//! file names collision-free for arbitrary nested paths.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

const ADDITIONS_DIR: &str = "additions";
const REMOVALS_DIR: &str = "removals";

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the staging directory (typically `.twig/staging`)
    path: Box<Path>,
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeMap<String, ObjectId>,
    /// Whether the in-memory state diverged from disk since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load both mappings from disk, replacing the in-memory state
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions = Self::read_entries(&self.path.join(ADDITIONS_DIR))?;
        self.removals = Self::read_entries(&self.path.join(REMOVALS_DIR))?;
        self.changed = false;

        Ok(())
    }

    /// Persist the in-memory state if it changed
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        Self::write_entries(&self.path.join(ADDITIONS_DIR), &self.additions)?;
        Self::write_entries(&self.path.join(REMOVALS_DIR), &self.removals)?;
        self.changed = false;

        Ok(())
    }

    /// Queue content for a path, cancelling any pending removal
    pub fn stage_addition(&mut self, path: &str, oid: ObjectId) {
        self.removals.remove(path);
        self.additions.insert(path.to_string(), oid);
        self.changed = true;
    }

    /// Queue a path for untracking, cancelling any pending addition
    pub fn stage_removal(&mut self, path: &str, oid: ObjectId) {
        self.additions.remove(path);
        self.removals.insert(path.to_string(), oid);
        self.changed = true;
    }

    /// Drop any pending change for a path; returns whether one existed
    pub fn unstage(&mut self, path: &str) -> bool {
        let had_addition = self.additions.remove(path).is_some();
        let had_removal = self.removals.remove(path).is_some();

        if had_addition || had_removal {
            self.changed = true;
        }

        had_addition || had_removal
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }

        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeMap<String, ObjectId> {
        &self.removals
    }

    pub fn staged_addition(&self, path: &str) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.removals.contains_key(path)
    }

    fn entry_file_name(path: &str) -> String {
        ObjectId::hash(path.as_bytes()).to_string()
    }

    fn read_entries(dir: &Path) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let mut entries = BTreeMap::new();
        if !dir.is_dir() {
            return Ok(entries);
        }

        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to list staging directory {:?}", dir))?
        {
            let entry_path = entry?.path();
            let content = std::fs::read_to_string(&entry_path)
                .with_context(|| format!("failed to read staging entry {:?}", entry_path))?;

            match content.split_once(' ') {
                Some((oid, path)) => {
                    entries.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                None => {
                    tracing::warn!(entry = ?entry_path, "ignoring malformed staging entry");
                }
            }
        }

        Ok(entries)
    }

    fn write_entries(dir: &Path, entries: &BTreeMap<String, ObjectId>) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create staging directory {:?}", dir))?;

        // drop entries that are no longer staged
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            let still_staged = entries
                .keys()
                .any(|path| Self::entry_file_name(path) == file_name);

            if !still_staged {
                std::fs::remove_file(entry.path()).with_context(|| {
                    format!("failed to remove staging entry {:?}", entry.path())
                })?;
            }
        }

        for (path, oid) in entries {
            let entry_path = dir.join(Self::entry_file_name(path));
            let mut entry_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&entry_path)
                .with_context(|| format!("failed to open staging entry {:?}", entry_path))?;
            let mut lock = file_guard::lock(&mut entry_file, file_guard::Lock::Exclusive, 0, 1)?;
            lock.deref_mut()
                .write_all(format!("{} {}", oid, path).as_bytes())?;
        }

        Ok(())
    }
}
