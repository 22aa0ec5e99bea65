//! PAC archive reading and sprite extraction.
//!
//! An archive is a little-endian entry count followed by fixed 40-byte
//! records `{offset: u32, size: u32, name: [u8; 32]}`. Archives that begin
//! with the ASCII magic `PACK` carry the count at byte 4 and the table at
//! byte 8 instead.

mod entry;
mod extract;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::limits::{ARCHIVE_ENTRY_SIZE, ARCHIVE_HEADER_SIZE, PACK_HEADER_SIZE};
use crate::error::{Error, Result};

pub use entry::{Entry, decode_name};
pub use extract::{
    discover_archives, extract_all_matching, extract_all_matching_from_directory,
    find_and_extract, is_sprite_name, is_sprite_path,
};

const PACK_MAGIC: &[u8; 4] = b"PACK";

/// Header variant detected when the archive was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLayout {
    /// Count at byte 0, table at byte 4.
    Plain,
    /// `PACK` magic, count at byte 4, table at byte 8.
    Pack,
}

impl ArchiveLayout {
    fn table_start(self) -> usize {
        match self {
            Self::Plain => ARCHIVE_HEADER_SIZE,
            Self::Pack => PACK_HEADER_SIZE,
        }
    }
}

/// An archive blob plus its parsed entry table.
#[derive(Debug, Clone)]
pub struct Archive {
    data: Vec<u8>,
    layout: ArchiveLayout,
    entries: Vec<Entry>,
}

impl Archive {
    /// Parse the header and entry table of `data`.
    ///
    /// Fails only when the header itself is missing. A declared count larger
    /// than the table records that fit in the blob is clamped.
    pub fn open(data: Vec<u8>) -> Result<Self> {
        let layout = if data.starts_with(PACK_MAGIC) {
            ArchiveLayout::Pack
        } else {
            ArchiveLayout::Plain
        };
        let table_start = layout.table_start();
        if data.len() < table_start {
            return Err(Error::ArchiveTooSmall {
                len: data.len(),
                required: table_start,
            });
        }

        let count_at = table_start - ARCHIVE_HEADER_SIZE;
        let declared = read_u32_le(&data, count_at).unwrap_or(0) as usize;
        let fits = (data.len() - table_start) / ARCHIVE_ENTRY_SIZE;
        let count = if declared > fits {
            warn!(
                "Archive declares {} entries but only {} fit in {} bytes, clamping",
                declared,
                fits,
                data.len()
            );
            fits
        } else {
            declared
        };

        let entries = (0..count)
            .filter_map(|index| {
                let start = table_start + index * ARCHIVE_ENTRY_SIZE;
                Entry::parse(index, &data[start..start + ARCHIVE_ENTRY_SIZE])
            })
            .collect::<Vec<_>>();

        debug!("Opened {:?} archive with {} entries", layout, entries.len());
        Ok(Self {
            data,
            layout,
            entries,
        })
    }

    /// Read and open an archive file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(fs::read(path)?)
    }

    pub fn layout(&self) -> ArchiveLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entry_name(&self, index: usize) -> Option<&str> {
        self.entry(index).map(|e| e.name.as_str())
    }

    /// Payload size, or 0 when `index` is out of range.
    pub fn entry_size(&self, index: usize) -> u32 {
        self.entry(index).map_or(0, |e| e.size)
    }

    pub fn entry_offset(&self, index: usize) -> Option<u32> {
        self.entry(index).map(|e| e.offset)
    }

    /// Borrow the payload bytes of an entry.
    pub fn payload(&self, index: usize) -> Result<&[u8]> {
        let entry = self.entry(index).ok_or(Error::EntryOutOfRange {
            index,
            count: self.entries.len(),
        })?;
        let start = entry.offset as usize;
        start
            .checked_add(entry.size as usize)
            .and_then(|end| self.data.get(start..end))
            .ok_or(Error::EntryOutOfBounds {
                index,
                offset: entry.offset,
                size: entry.size,
                len: self.data.len(),
            })
    }

    /// Copy the payload bytes of an entry; `None` for a bad index or a
    /// payload that runs past the end of the blob.
    pub fn extract(&self, index: usize) -> Option<Vec<u8>> {
        self.payload(index).ok().map(<[u8]>::to_vec)
    }
}

pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
