//! Commit object
//!
//! A commit is a snapshot node in the history graph. It records:
//! - the primary parent (absent only for the root commit)
//! - the secondary parent and merge flag (merge commits only)
//! - the tracked files as an ordered `path -> blob id` mapping
//! - a timestamp and a message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! merge-parent <parent-sha>
//! merged <true|false>
//! blob <blob-sha> <path>
//! timestamp <unix-seconds> <timezone>
//!
//! <commit message>
//! ```
//!
//! ## Identity
//!
//! The object ID is computed over the same encoding with the `timestamp` line left out,
//! so two commits built from the same message, parents, merge flag and mapping share an
//! ID no matter when they were made. The database keeps the first payload stored under
//! an ID.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

/// Message of the commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Tracked files of a commit, ordered by path
pub type FileMapping = BTreeMap<PathBuf, ObjectId>;

/// Point in time attached to a commit
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Timestamp(chrono::DateTime<chrono::FixedOffset>);

impl Timestamp {
    pub fn new(timestamp: chrono::DateTime<chrono::FixedOffset>) -> Self {
        Timestamp(timestamp)
    }

    pub fn now() -> Self {
        Timestamp(chrono::Local::now().fixed_offset())
    }

    /// The fixed timestamp of the root commit: the Unix epoch in UTC
    pub fn epoch() -> Self {
        Timestamp(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset())
    }

    /// Read the timestamp from `GITLET_COMMIT_DATE`, falling back to the current time
    pub fn load_from_env() -> Self {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                chrono::DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| {
                        chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z")
                    })
                    .ok()
            })
            .map(Timestamp)
            .unwrap_or_else(Self::now)
    }

    /// Format like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable(&self) -> String {
        self.0.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    fn encode(&self) -> String {
        format!("{} {}", self.0.timestamp(), self.0.format("%z"))
    }

    fn decode(value: &str) -> anyhow::Result<Self> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid timestamp: missing timezone")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid timestamp: seconds are not a number")?;
        let offset = *chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .context("Invalid timestamp: bad timezone")?
        .offset();
        let datetime = chrono::DateTime::from_timestamp(seconds, 0)
            .context("Invalid timestamp: out of range")?
            .with_timezone(&offset);

        Ok(Timestamp(datetime))
    }
}

/// Slim representation of a commit used for history traversal
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    /// Primary parent first, then the merge parent if any
    pub parents: Vec<ObjectId>,
}

/// Snapshot node of the history graph
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    merged: bool,
    files: FileMapping,
    timestamp: Timestamp,
}

impl Commit {
    pub fn new(
        message: String,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        files: FileMapping,
        timestamp: Timestamp,
    ) -> Self {
        Commit {
            merged: merge_parent.is_some(),
            message,
            parent,
            merge_parent,
            files,
            timestamp,
        }
    }

    /// The root commit every repository starts from
    pub fn initial() -> Self {
        Commit::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            None,
            None,
            FileMapping::new(),
            Timestamp::epoch(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    pub fn is_merge(&self) -> bool {
        self.merged
    }

    pub fn files(&self) -> &FileMapping {
        &self.files
    }

    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn payload(&self, with_timestamp: bool) -> String {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge-parent {merge_parent}"));
        }
        lines.push(format!("merged {}", self.merged));
        for (path, oid) in &self.files {
            lines.push(format!("blob {oid} {}", path.to_string_lossy()));
        }
        if with_timestamp {
            lines.push(format!("timestamp {}", self.timestamp.encode()));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(frame(&self.object_type(), self.payload(true).as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut merged = false;
        let mut files = FileMapping::new();
        let mut timestamp = None;

        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line '{line}'"))?;

            match key {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge-parent" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "merged" => {
                    merged = value
                        .parse::<bool>()
                        .context("Invalid commit object: invalid merge flag")?
                }
                "blob" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: invalid blob line")?;
                    files.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                "timestamp" => timestamp = Some(Timestamp::decode(value)?),
                _ => anyhow::bail!("Invalid commit object: unknown header '{key}'"),
            }
        }

        Ok(Commit {
            message: message.to_string(),
            parent,
            merge_parent,
            merged,
            files,
            timestamp: timestamp.context("Invalid commit object: missing timestamp")?,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn identity(&self) -> anyhow::Result<Bytes> {
        Ok(frame(&self.object_type(), self.payload(false).as_bytes()))
    }
}
