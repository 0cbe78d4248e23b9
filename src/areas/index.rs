//! Staging area
//!
//! The staging area holds the changes pending for the next commit, relative to the
//! tip of the current branch:
//!
//! - `added`: files staged for addition, mapped to the blob of their staged content
//! - `removed`: files staged for removal
//!
//! A path is never in both collections. The area is persisted to `.gitlet/index`
//! (see [`crate::artifacts::index`] for the format) and verified by checksum on load.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{RemovedEntry, StagedEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, anyhow};
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Size of the path length prefix of an entry
const PATH_LENGTH_SIZE: usize = 2;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    added: BTreeMap<PathBuf, ObjectId>,
    removed: BTreeSet<PathBuf>,
    /// Set when the in-memory state differs from the file
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty file loads as an empty staging area.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.added.clear();
        self.removed.clear();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header = self.parse_header(&mut reader)?;
        self.parse_added(header.added_count, &mut reader)?;
        self.parse_removed(header.removed_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(&self, reader: &mut Checksum) -> anyhow::Result<IndexHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header)
    }

    fn parse_added(&mut self, count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..count {
            let entry_bytes = Self::read_entry(reader, OBJECT_ID_BYTES)?;
            let entry = StagedEntry::deserialize(Cursor::new(entry_bytes))?;

            self.added.insert(entry.path, entry.oid);
        }

        Ok(())
    }

    fn parse_removed(&mut self, count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..count {
            let entry_bytes = Self::read_entry(reader, 0)?;
            let entry = RemovedEntry::deserialize(Cursor::new(entry_bytes))?;

            self.removed.insert(entry.path);
        }

        Ok(())
    }

    /// Read one entry: a fixed-size prefix, the path length, then the path itself
    fn read_entry(reader: &mut Checksum, fixed_size: usize) -> anyhow::Result<Bytes> {
        let head = reader.read(fixed_size + PATH_LENGTH_SIZE)?;
        let path_length =
            u16::from_be_bytes([head[fixed_size], head[fixed_size + 1]]) as usize;
        let path = reader.read(path_length)?;

        Ok([head, path].concat().into())
    }

    /// Persist the staging area
    ///
    /// Nothing is written when the file exists and the staging area has not changed
    /// since it was loaded or last written.
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed && self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = IndexHeader {
            added_count: self.added.len() as u32,
            removed_count: self.removed.len() as u32,
            ..IndexHeader::empty()
        };
        writer.write(&header.serialize()?)?;

        for (path, oid) in &self.added {
            let entry = StagedEntry::new(path.clone(), oid.clone());
            writer.write(&entry.serialize()?)?;
        }

        for path in &self.removed {
            let entry = RemovedEntry::new(path.clone());
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        tracing::debug!(
            added = self.added.len(),
            removed = self.removed.len(),
            "wrote staging area"
        );

        Ok(())
    }

    /// Stage `path` for addition with the given blob, dropping any pending removal
    pub fn add(&mut self, path: PathBuf, oid: ObjectId) {
        self.removed.remove(&path);
        self.added.insert(path, oid);
        self.changed = true;
    }

    /// Stage `path` for removal, dropping any pending addition
    pub fn remove(&mut self, path: PathBuf) {
        self.added.remove(&path);
        self.removed.insert(path);
        self.changed = true;
    }

    /// Forget every pending change to `path`
    ///
    /// Returns whether the path was staged for addition.
    pub fn unstage(&mut self, path: &Path) -> bool {
        let was_added = self.added.remove(path).is_some();
        let was_removed = self.removed.remove(path);

        self.changed |= was_added || was_removed;
        was_added
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.added.clear();
        self.removed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn added(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<PathBuf> {
        &self.removed
    }

    pub fn staged_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.added.get(path)
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.added.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removed.contains(path)
    }

    /// Whether `path` is mentioned in either collection
    pub fn is_staged(&self, path: &Path) -> bool {
        self.is_staged_for_addition(path) || self.is_staged_for_removal(path)
    }
}
