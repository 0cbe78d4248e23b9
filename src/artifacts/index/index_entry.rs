//! Staging record entries
//!
//! Added entries carry the blob ID and the path, removed entries only the path.
//! Paths are stored with `/` separators behind a big-endian `u16` length.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

/// Longest path a staging entry can hold
pub const MAX_PATH_SIZE: usize = u16::MAX as usize;

/// A file staged for addition
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StagedEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
}

/// A file staged for removal
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RemovedEntry {
    pub path: PathBuf,
}

impl Packable for StagedEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();
        self.oid.write_h40_to(&mut bytes)?;
        write_path(&mut bytes, &self.path)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StagedEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let oid = ObjectId::read_h40_from(&mut reader)?;
        let path = read_path(&mut reader)?;

        Ok(StagedEntry { path, oid })
    }
}

impl Packable for RemovedEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();
        write_path(&mut bytes, &self.path)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for RemovedEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        Ok(RemovedEntry {
            path: read_path(&mut reader)?,
        })
    }
}

fn write_path(writer: &mut impl Write, path: &Path) -> anyhow::Result<()> {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.len() > MAX_PATH_SIZE {
        return Err(anyhow!("Path is too long for the index: {path}"));
    }

    writer.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
    writer.write_all(path.as_bytes())?;

    Ok(())
}

fn read_path(reader: &mut impl Read) -> anyhow::Result<PathBuf> {
    let length = reader.read_u16::<byteorder::NetworkEndian>()? as usize;

    let mut path = vec![0u8; length];
    reader.read_exact(&mut path)?;
    let path = String::from_utf8(path).map_err(|_| anyhow!("Invalid path in index entry"))?;

    Ok(PathBuf::from(path))
}
