//! NCM (NetEase Cloud Music) recognition. The container body is
//! encrypted, so this reader only establishes the format identity from
//! the magic signature; stream info and tags stay empty.

use crate::common::error::{ProbeError, Result};
use crate::common::io::ByteReader;
use crate::reader::{AudioFile, FormatKind, FormatReader, ReaderProperties};

const MAGIC: &[u8; 8] = b"CTENFDAM";

pub(crate) struct NcmReader;

impl FormatReader for NcmReader {
    fn matches(&self, source: &ByteReader<'_>) -> bool {
        let mut peek = source.peek();
        matches!(peek.read_bytes(8), Ok(magic) if magic == MAGIC)
    }

    fn fetch(&self, source: &mut ByteReader<'_>, _props: &ReaderProperties) -> Result<AudioFile> {
        if source.read_bytes(8)? != MAGIC {
            return Err(ProbeError::FormatMismatch);
        }
        Ok(AudioFile::new(FormatKind::Ncm))
    }
}
