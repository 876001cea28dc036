use encoding_rs::{Encoding, WINDOWS_1252};

use crate::common::error::Result;
use crate::common::io::ByteReader;
use crate::streaminfo::StreamInfo;
use crate::tag::TagStore;

/// The container/tag formats this crate recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Free Lossless Audio Codec.
    Flac,
    /// Monkey's Audio.
    Ape,
    /// MPEG-1 Audio Layer 3, carrying ID3v2 tags.
    Mp3,
    /// NetEase Cloud Music container.
    Ncm,
}

/// Everything a reader extracts from one source: the format identity,
/// normalized stream properties, and the raw tag pairs.
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub kind: FormatKind,
    pub info: StreamInfo,
    pub tags: TagStore,
}

impl AudioFile {
    pub(crate) fn new(kind: FormatKind) -> Self {
        AudioFile {
            kind,
            info: StreamInfo::default(),
            tags: TagStore::default(),
        }
    }
}

/// Knobs for reading, passed into every fetch.
#[derive(Debug, Clone, Copy)]
pub struct ReaderProperties {
    /// Charset applied when an ID3v2 text-encoding byte says 0x00.
    ///
    /// The standard calls for ISO 8859-1, but many editors write the
    /// user's system default instead — GBK or GB18030 in a Chinese
    /// environment. `WINDOWS_1252` (the web superset of Latin-1) is the
    /// default.
    pub id3v2_charset: &'static Encoding,
}

impl Default for ReaderProperties {
    fn default() -> Self {
        ReaderProperties {
            id3v2_charset: WINDOWS_1252,
        }
    }
}

/// One recognizer/extractor per format.
///
/// Implementations are stateless unit structs, so a fixed list of them is
/// safe to share across threads.
pub(crate) trait FormatReader: Sync {
    /// Does the stream carry this format's signature? Must not advance the
    /// caller's cursor; implementations peek internally.
    fn matches(&self, source: &ByteReader<'_>) -> bool;

    /// Consume the recognized header/tag region and build the output.
    /// The trailing audio payload stays unconsumed.
    fn fetch(&self, source: &mut ByteReader<'_>, props: &ReaderProperties) -> Result<AudioFile>;
}
