//! Content-addressed object store
//!
//! Blobs and commits live in separate directories, fanned out by the first two
//! hex characters of their ID and zlib-compressed on disk. Objects are
//! append-only: an existing object file is never rewritten.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of resolving an abbreviated commit ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixMatch {
    Unique(ObjectId),
    /// Every matching commit, sorted
    Ambiguous(Vec<ObjectId>),
    None,
}

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn kind_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.dir_name())
    }

    pub fn object_file(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.kind_path(object_type).join(object_id.to_path())
    }

    pub fn contains(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.object_file(object_type, object_id).is_file()
    }

    /// Persist an object unless it already exists and return its ID
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
            tracing::debug!(kind = %object.object_type(), oid = %object_id, "stored object");
        }

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.read_object(self.object_file(ObjectType::Blob, object_id))?;
        Blob::deserialize(Cursor::new(content))
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.read_object(self.object_file(ObjectType::Commit, object_id))?;
        Commit::deserialize(Cursor::new(content))
            .with_context(|| format!("Unable to parse commit {}", object_id))
    }

    /// All stored IDs of one object kind, sorted
    pub fn list(&self, object_type: ObjectType) -> anyhow::Result<Vec<ObjectId>> {
        let kind_path = self.kind_path(object_type);
        if !kind_path.is_dir() {
            return Ok(Vec::new());
        }

        let oids = WalkDir::new(&kind_path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let dir_name = entry.path().parent()?.file_name()?.to_string_lossy().to_string();
                let file_name = entry.file_name().to_string_lossy().to_string();
                // skips temporary files left behind by an interrupted write
                ObjectId::try_parse(format!("{}{}", dir_name, file_name)).ok()
            })
            .collect::<BTreeSet<_>>();

        Ok(oids.into_iter().collect())
    }

    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.list(ObjectType::Commit)
    }

    /// Resolve a full or abbreviated commit ID
    ///
    /// A full match always wins. Otherwise every stored commit starting with
    /// the prefix is a candidate; more than one candidate is ambiguous.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<PrefixMatch> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(PrefixMatch::None);
        }

        if let Ok(oid) = ObjectId::try_parse(prefix.to_string())
            && self.contains(ObjectType::Commit, &oid)
        {
            return Ok(PrefixMatch::Unique(oid));
        }

        let mut matches = self
            .list_commits()?
            .into_iter()
            .filter(|oid| oid.starts_with(prefix))
            .collect::<Vec<_>>();

        match matches.len() {
            0 => Ok(PrefixMatch::None),
            1 => Ok(PrefixMatch::Unique(matches.remove(0))),
            _ => Ok(PrefixMatch::Ambiguous(matches)),
        }
    }

    /// Resolve a commit prefix or fail with the matching logical error
    pub fn find_commit(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        match self.resolve_commit_prefix(prefix)? {
            PrefixMatch::Unique(oid) => Ok(oid),
            PrefixMatch::Ambiguous(candidates) => Err(TwigError::AmbiguousCommit).with_context(
                || {
                    format!(
                        "prefix {} matches {}",
                        prefix,
                        candidates
                            .iter()
                            .map(ObjectId::to_short_oid)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                },
            ),
            PrefixMatch::None => Err(TwigError::NoSuchCommit.into()),
        }
    }

    /// Every commit reachable from `start` through both parent edges
    ///
    /// Uses an explicit work stack; the DAG is acyclic by construction.
    pub fn ancestors(&self, start: &ObjectId) -> anyhow::Result<BTreeSet<ObjectId>> {
        let mut ancestors = BTreeSet::new();
        let mut work = vec![start.clone()];

        while let Some(oid) = work.pop() {
            if !ancestors.insert(oid.clone()) {
                continue;
            }

            let commit = self.load_commit(&oid)?;
            work.extend(commit.parents());
        }

        Ok(ancestors)
    }

    /// Copy an object file byte-for-byte into another store unless it is there already
    ///
    /// Returns whether anything was copied.
    pub fn transfer(
        &self,
        object_type: ObjectType,
        object_id: &ObjectId,
        destination: &Database,
    ) -> anyhow::Result<bool> {
        let destination_path = destination.object_file(object_type, object_id);
        if destination_path.exists() {
            return Ok(false);
        }

        let source_path = self.object_file(object_type, object_id);
        let raw = std::fs::read(&source_path).with_context(|| {
            format!("Unable to read object file {}", source_path.display())
        })?;

        let object_dir = destination_path
            .parent()
            .context(format!("Invalid object path {}", destination_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        destination.write_raw(destination_path, &raw)?;

        Ok(true)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_content = Self::compress(object_content)?;
        self.write_raw(object_path, &object_content)
    }

    fn write_raw(&self, object_path: PathBuf, data: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(data).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        drop(file);

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

/// Memoizes slim commits while walking the commit graph
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        oid: &ObjectId,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(slim_commit) = self.commits.borrow().get(oid) {
            return Ok(slim_commit.clone());
        }

        let commit = database.load_commit(oid)?;
        let slim_commit = SlimCommit {
            parents: commit.parents(),
        };
        self.commits
            .borrow_mut()
            .insert(oid.clone(), slim_commit.clone());

        Ok(slim_commit)
    }
}
