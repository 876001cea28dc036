use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::common::error::{ProbeError, Result};
use crate::common::io::ByteReader;
use crate::id3::frames;
use crate::id3::header::syncsafe_u28;

/// What a frame's payload is, as far as this crate decodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Any frame whose ID starts with `T` (TIT2, TPE1, …).
    Text,
    /// `COMM`.
    Comment,
    /// `USLT`.
    UnsynchronizedLyrics,
    /// Skipped by declared length.
    Unknown,
}

/// The text-encoding byte leading every text-bearing payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// 0x00 — the configured single-byte charset (Latin-1 by default,
    /// GBK/GB18030 for files written by legacy Chinese-locale editors).
    Configured,
    /// 0x01 — UTF-16 with BOM, terminated with 0x00 0x00.
    Utf16,
    /// 0x02 — UTF-16BE without BOM (ID3v2.4.0).
    Utf16Be,
    /// 0x03 — UTF-8 (ID3v2.4.0).
    Utf8,
}

impl TextEncoding {
    fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(TextEncoding::Configured),
            0x01 => Ok(TextEncoding::Utf16),
            0x02 => Ok(TextEncoding::Utf16Be),
            0x03 => Ok(TextEncoding::Utf8),
            other => Err(ProbeError::Malformed(format!(
                "invalid text encoding byte {other:#04x}"
            ))),
        }
    }
}

/// A 10-byte ID3v2 frame header.
///
/// Frame sizes are plain 32-bit big-endian in v2.3 and syncsafe in v2.4;
/// the two flag bytes also changed their layout between the versions, so
/// all flag access goes through version-aware methods instead of raw masks.
#[derive(Debug, Clone)]
pub struct Id3v2FrameHeader {
    pub id: [u8; 4],
    /// Payload size, excluding this 10-byte header.
    pub size: u32,
    flags: [u8; 2],
    version: u8,
}

impl Id3v2FrameHeader {
    pub fn parse(source: &mut ByteReader<'_>, version: u8) -> Result<Self> {
        let mut id = [0u8; 4];
        id.copy_from_slice(source.read_bytes(4)?);

        let size = match version {
            3 => source.read_u32_be()?,
            4 => {
                let mut size_bytes = [0u8; 4];
                size_bytes.copy_from_slice(source.read_bytes(4)?);
                syncsafe_u28(size_bytes)
            }
            other => {
                return Err(ProbeError::Malformed(format!(
                    "invalid ID3v2 version: {other}"
                )))
            }
        };

        let mut flags = [0u8; 2];
        flags.copy_from_slice(source.read_bytes(2)?);

        Ok(Id3v2FrameHeader {
            id,
            size,
            flags,
            version,
        })
    }

    /// Frame ID as text; the ID is defined to be A–Z and 0–9.
    pub fn id_str(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }

    /// Four zero bytes in place of a frame ID mean the rest of the tag
    /// region is padding.
    pub fn is_padding(&self) -> bool {
        self.id == [0, 0, 0, 0]
    }

    pub fn kind(&self) -> FrameKind {
        if self.id[0] == b'T' {
            FrameKind::Text
        } else if &self.id[..] == frames::COMM.as_bytes() {
            FrameKind::Comment
        } else if &self.id[..] == frames::USLT.as_bytes() {
            FrameKind::UnsynchronizedLyrics
        } else {
            FrameKind::Unknown
        }
    }

    pub fn tag_alter_preservation(&self) -> bool {
        self.flags[0] & 0x80 != 0
    }

    pub fn file_alter_preservation(&self) -> bool {
        self.flags[0] & 0x40 != 0
    }

    pub fn read_only(&self) -> bool {
        self.flags[0] & 0x20 != 0
    }

    pub fn compression(&self) -> bool {
        match self.version {
            3 => self.flags[1] & 0x80 != 0,
            _ => self.flags[1] & 0x08 != 0,
        }
    }

    pub fn encryption(&self) -> bool {
        match self.version {
            3 => self.flags[1] & 0x40 != 0,
            _ => self.flags[1] & 0x04 != 0,
        }
    }

    pub fn grouping_identity(&self) -> bool {
        match self.version {
            3 => self.flags[1] & 0x20 != 0,
            _ => self.flags[1] & 0x40 != 0,
        }
    }

    /// v2.4 per-frame unsynchronization.
    pub fn unsynchronization(&self) -> bool {
        self.version == 4 && self.flags[1] & 0x02 != 0
    }

    /// v2.4 data length indicator: four extra bytes before the payload.
    pub fn data_length_indicator(&self) -> bool {
        self.version == 4 && self.flags[1] & 0x01 != 0
    }

    /// Read a text-information payload (`T???` frames).
    pub fn read_text(
        &self,
        source: &mut ByteReader<'_>,
        charset: &'static Encoding,
    ) -> Result<String> {
        let payload_len = if self.data_length_indicator() {
            source.skip(4)?;
            (self.size as usize).checked_sub(5)
        } else {
            (self.size as usize).checked_sub(1)
        }
        .ok_or_else(|| ProbeError::Malformed(format!("text frame {} too short", self.id_str())))?;

        let encoding = TextEncoding::from_byte(source.read_u8()?)?;
        let payload = source.read_bytes(payload_len)?;
        Ok(self.decode_payload(payload, encoding, charset))
    }

    /// Read a `COMM`/`USLT` payload: encoding byte, 3-byte language code
    /// (ignored), then descriptor + text.
    pub fn read_language_text(
        &self,
        source: &mut ByteReader<'_>,
        charset: &'static Encoding,
    ) -> Result<String> {
        let payload_len = (self.size as usize).checked_sub(4).ok_or_else(|| {
            ProbeError::Malformed(format!("language frame {} too short", self.id_str()))
        })?;

        let encoding = TextEncoding::from_byte(source.read_u8()?)?;
        source.skip(3)?;

        let mut payload = source.read_bytes(payload_len)?;
        // An empty content descriptor leaves a stray leading terminator.
        if payload.first() == Some(&0x00) {
            payload = &payload[1..];
        }

        Ok(self.decode_payload(payload, encoding, charset))
    }

    fn decode_payload(
        &self,
        payload: &[u8],
        encoding: TextEncoding,
        charset: &'static Encoding,
    ) -> String {
        if self.unsynchronization() {
            decode_terminated(&synchronize(payload), encoding, charset)
        } else {
            decode_terminated(payload, encoding, charset)
        }
    }
}

/// Undo ID3v2 unsynchronization: every `FF 00` pair collapses back to a
/// single `FF`, scanning left to right without overlap.
pub fn synchronize(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;
    while let Some(offset) = memchr::memchr(0xFF, &data[i..]) {
        let end = i + offset + 1;
        out.extend_from_slice(&data[i..end]);
        i = end;
        if data.get(i) == Some(&0x00) {
            i += 1;
        }
    }
    out.extend_from_slice(&data[i..]);
    out
}

/// Decode a terminated payload.
///
/// Some tag writers omit the trailing terminator entirely, so a missing
/// one is tolerated rather than rejected. UTF-16 payloads occasionally
/// lead with a BOM followed by an immediate terminator (an empty BOM'd
/// string) before the real text; that four-byte prefix is dropped too.
fn decode_terminated(bytes: &[u8], encoding: TextEncoding, charset: &'static Encoding) -> String {
    match encoding {
        TextEncoding::Configured => decode_single_byte(bytes, charset),
        TextEncoding::Utf8 => decode_single_byte(bytes, UTF_8),
        TextEncoding::Utf16 => {
            let mut bytes = bytes;
            if bytes.len() > 4
                && (bytes[..4] == [0xFF, 0xFE, 0x00, 0x00] || bytes[..4] == [0xFE, 0xFF, 0x00, 0x00])
            {
                bytes = &bytes[4..];
            }
            let bytes = strip_utf16_terminator(bytes);
            // The BOM picks the byte order; big-endian when absent.
            if bytes.starts_with(&[0xFF, 0xFE]) {
                decode_utf16(&bytes[2..], UTF_16LE)
            } else if bytes.starts_with(&[0xFE, 0xFF]) {
                decode_utf16(&bytes[2..], UTF_16BE)
            } else {
                decode_utf16(bytes, UTF_16BE)
            }
        }
        TextEncoding::Utf16Be => decode_utf16(strip_utf16_terminator(bytes), UTF_16BE),
    }
}

fn decode_single_byte(bytes: &[u8], charset: &'static Encoding) -> String {
    let bytes = match bytes.last() {
        Some(&0x00) => &bytes[..bytes.len() - 1],
        _ => bytes,
    };
    charset.decode_without_bom_handling(bytes).0.into_owned()
}

fn strip_utf16_terminator(bytes: &[u8]) -> &[u8] {
    if bytes.len() >= 2 && bytes[bytes.len() - 2..] == [0x00, 0x00] {
        &bytes[..bytes.len() - 2]
    } else {
        bytes
    }
}

fn decode_utf16(bytes: &[u8], order: &'static Encoding) -> String {
    order.decode_without_bom_handling(bytes).0.into_owned()
}
