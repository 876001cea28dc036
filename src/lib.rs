//! tagprobe — read-only audio metadata probe.
//!
//! Feed it a byte slice (or a path); it works out which supported
//! container/tag format the stream is — FLAC, APE (Monkey's Audio),
//! MP3/ID3v2 or NCM — and extracts stream properties and textual tags
//! into a normalized [`AudioFile`].
//!
//! ```no_run
//! let file = tagprobe::read_path("album/track.flac")?;
//! println!(
//!     "{:?}: {} ms, {}",
//!     file.kind,
//!     file.info.duration_millis(),
//!     file.tags.get_field(tagprobe::TagField::Title).unwrap_or_default(),
//! );
//! # Ok::<(), tagprobe::ProbeError>(())
//! ```
//!
//! Detection is signature-based and non-destructive: each reader inspects
//! a peek of the stream start, and the first one whose signature matches
//! re-reads the metadata region from the origin. File extensions are never
//! consulted.

pub mod ape;
pub mod common;
pub mod flac;
pub mod id3;
pub mod mp3;
pub mod ncm;
pub mod reader;
pub mod streaminfo;
pub mod tag;
pub mod vorbis;

use std::path::Path;

use log::debug;

use crate::ape::ApeReader;
use crate::common::io::ByteReader;
use crate::flac::FlacReader;
use crate::mp3::Mp3Reader;
use crate::ncm::NcmReader;
use crate::reader::FormatReader;

pub use crate::common::error::{ProbeError, Result};
pub use crate::reader::{AudioFile, FormatKind, ReaderProperties};
pub use crate::streaminfo::StreamInfo;
pub use crate::tag::{MergePolicy, TagField, TagStore};

/// Fixed probe order, most prevalent format first.
static READERS: [&dyn FormatReader; 4] = [&Mp3Reader, &FlacReader, &ApeReader, &NcmReader];

/// Probe `data` with default [`ReaderProperties`].
pub fn read(data: &[u8]) -> Result<AudioFile> {
    read_with(data, &ReaderProperties::default())
}

/// Probe `data`: try each reader's signature against the stream start and
/// let the first match consume the metadata region.
pub fn read_with(data: &[u8], props: &ReaderProperties) -> Result<AudioFile> {
    let origin = ByteReader::new(data);

    for reader in READERS {
        if reader.matches(&origin) {
            let mut source = origin.peek();
            let file = reader.fetch(&mut source, props)?;
            debug!(
                "probed {:?}, {} tag entries, {} bytes of metadata",
                file.kind,
                file.tags.len(),
                source.position()
            );
            return Ok(file);
        }
    }

    Err(ProbeError::Unsupported)
}

/// Read a file into memory and probe it with default properties.
pub fn read_path(path: impl AsRef<Path>) -> Result<AudioFile> {
    read_path_with(path, &ReaderProperties::default())
}

/// Read a file into memory and probe it.
pub fn read_path_with(path: impl AsRef<Path>, props: &ReaderProperties) -> Result<AudioFile> {
    let data = std::fs::read(path)?;
    read_with(&data, props)
}
