//! Vorbis comment block parsing, as embedded in FLAC metadata (and Ogg
//! containers generally). All length prefixes are 32-bit little-endian —
//! the one little-endian corner of an otherwise big-endian format.

use crate::common::error::Result;
use crate::common::io::ByteReader;

/// A parsed Vorbis comment block, without the framing bit.
#[derive(Debug, Clone)]
pub struct VorbisComment {
    pub vendor: String,
    /// Raw `FIELD=value` strings, order preserved.
    pub user_comments: Vec<String>,
}

impl VorbisComment {
    pub fn parse(source: &mut ByteReader<'_>) -> Result<Self> {
        let vendor_len = source.read_u32_le()? as usize;
        let vendor = String::from_utf8_lossy(source.read_bytes(vendor_len)?).into_owned();

        let count = source.read_u32_le()?;
        let mut user_comments = Vec::with_capacity(count.min(1024) as usize);
        for _ in 0..count {
            let len = source.read_u32_le()? as usize;
            let comment = String::from_utf8_lossy(source.read_bytes(len)?).into_owned();
            user_comments.push(comment);
        }

        Ok(VorbisComment {
            vendor,
            user_comments,
        })
    }

    /// Split the `FIELD=value` comments on the first `=`, trimming both
    /// sides; entries without a separator are dropped.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.user_comments.iter().filter_map(|comment| {
            comment
                .split_once('=')
                .map(|(field, value)| (field.trim(), value.trim()))
        })
    }
}
