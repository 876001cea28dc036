//! Monkey's Audio (APE) header reading. Everything here is little-endian.
//!
//! Files at version 3.98 and later open with a descriptor followed by a
//! "new" header carrying explicit stream parameters; older files use a
//! single combined header whose blocks-per-frame and bit depth must be
//! derived from the version, compression level and format flags.

use crate::common::error::{ProbeError, Result};
use crate::common::io::ByteReader;
use crate::reader::{AudioFile, FormatKind, FormatReader, ReaderProperties};

const ID_MAC: &[u8; 4] = b"MAC ";
/// Written by version > 3970 (3.97) encoders only.
const ID_MACF: &[u8; 4] = b"MACF";

/// Last version using the old combined header.
const LAST_OLD_HEADER_VERSION: u16 = 3970;

pub const COMPRESSION_LEVEL_FAST: u16 = 1000;
pub const COMPRESSION_LEVEL_NORMAL: u16 = 2000;
pub const COMPRESSION_LEVEL_HIGH: u16 = 3000;
pub const COMPRESSION_LEVEL_EXTRA_HIGH: u16 = 4000;
pub const COMPRESSION_LEVEL_INSANE: u16 = 5000;

const FORMAT_FLAG_8_BIT: u16 = 1 << 0;
const FORMAT_FLAG_24_BIT: u16 = 1 << 3;

/// The ID + version shared by both header generations, read via peek so
/// the real header parse can start from the beginning.
#[derive(Debug, Clone, Copy)]
struct ApeCommonHeader {
    id: [u8; 4],
    version: u16,
}

impl ApeCommonHeader {
    fn peek(source: &ByteReader<'_>) -> Result<Self> {
        let mut peek = source.peek();
        let mut id = [0u8; 4];
        id.copy_from_slice(peek.read_bytes(4)?);
        let version = peek.read_u16_le()?;
        Ok(ApeCommonHeader { id, version })
    }

    fn is_ape(&self) -> bool {
        &self.id == ID_MAC || &self.id == ID_MACF
    }
}

/// Combined header written by versions up to 3.97.
#[derive(Debug, Clone)]
struct ApeHeaderOld {
    version: u16,
    compression_level: u16,
    format_flags: u16,
    channels: u16,
    sample_rate: u32,
    total_frames: u32,
    final_frame_blocks: u32,
}

impl ApeHeaderOld {
    fn parse(source: &mut ByteReader<'_>) -> Result<Self> {
        source.skip(4)?; // id, validated during match
        let version = source.read_u16_le()?;
        let compression_level = source.read_u16_le()?;
        let format_flags = source.read_u16_le()?;
        let channels = source.read_u16_le()?;
        let sample_rate = source.read_u32_le()?;
        source.skip(4)?; // header bytes
        source.skip(4)?; // terminating bytes
        let total_frames = source.read_u32_le()?;
        let final_frame_blocks = source.read_u32_le()?;

        Ok(ApeHeaderOld {
            version,
            compression_level,
            format_flags,
            channels,
            sample_rate,
            total_frames,
            final_frame_blocks,
        })
    }

    /// Old headers never state blocks-per-frame; encoders fixed it by
    /// version, with the extra-high profile switching earlier.
    fn blocks_per_frame(&self) -> u64 {
        if self.version >= 3900
            || (self.version >= 3800 && self.compression_level == COMPRESSION_LEVEL_EXTRA_HIGH)
        {
            73_728
        } else {
            9_216
        }
    }

    fn bits(&self) -> u32 {
        if self.format_flags & FORMAT_FLAG_8_BIT != 0 {
            8
        } else if self.format_flags & FORMAT_FLAG_24_BIT != 0 {
            24
        } else {
            16
        }
    }

    fn sample_count(&self) -> u64 {
        total_sample_count(self.total_frames, self.blocks_per_frame(), self.final_frame_blocks)
    }
}

/// The 52-byte descriptor preceding the new header. Only consumed for its
/// size here; the seek-table and MD5 fields are not used for output.
#[derive(Debug, Clone)]
struct ApeDescriptor {
    #[allow(dead_code)]
    file_md5: [u8; 16],
}

impl ApeDescriptor {
    fn parse(source: &mut ByteReader<'_>) -> Result<Self> {
        source.skip(4)?; // id
        source.skip(2)?; // version
        source.skip(2)?; // padding
        source.skip(4)?; // descriptor bytes
        source.skip(4)?; // header bytes
        source.skip(4)?; // seek table bytes
        source.skip(4)?; // header data bytes
        source.skip(4)?; // ape frame data bytes
        source.skip(4)?; // ape frame data bytes high
        source.skip(4)?; // terminating data bytes
        let mut file_md5 = [0u8; 16];
        file_md5.copy_from_slice(source.read_bytes(16)?);
        Ok(ApeDescriptor { file_md5 })
    }
}

/// Header written after the descriptor by versions 3.98+.
#[derive(Debug, Clone)]
struct ApeHeader {
    blocks_per_frame: u32,
    final_frame_blocks: u32,
    total_frames: u32,
    bits_per_sample: u16,
    channels: u16,
    sample_rate: u32,
}

impl ApeHeader {
    fn parse(source: &mut ByteReader<'_>) -> Result<Self> {
        source.skip(2)?; // compression level
        source.skip(2)?; // format flags
        let blocks_per_frame = source.read_u32_le()?;
        let final_frame_blocks = source.read_u32_le()?;
        let total_frames = source.read_u32_le()?;
        let bits_per_sample = source.read_u16_le()?;
        let channels = source.read_u16_le()?;
        let sample_rate = source.read_u32_le()?;

        Ok(ApeHeader {
            blocks_per_frame,
            final_frame_blocks,
            total_frames,
            bits_per_sample,
            channels,
            sample_rate,
        })
    }

    fn sample_count(&self) -> u64 {
        total_sample_count(
            self.total_frames,
            u64::from(self.blocks_per_frame),
            self.final_frame_blocks,
        )
    }
}

/// Every frame holds `blocks_per_frame` blocks except the last one.
fn total_sample_count(total_frames: u32, blocks_per_frame: u64, final_frame_blocks: u32) -> u64 {
    if total_frames == 0 {
        0
    } else {
        u64::from(total_frames - 1) * blocks_per_frame + u64::from(final_frame_blocks)
    }
}

pub(crate) struct ApeReader;

impl FormatReader for ApeReader {
    fn matches(&self, source: &ByteReader<'_>) -> bool {
        matches!(ApeCommonHeader::peek(source), Ok(header) if header.is_ape())
    }

    fn fetch(&self, source: &mut ByteReader<'_>, _props: &ReaderProperties) -> Result<AudioFile> {
        let common = ApeCommonHeader::peek(source)?;
        if !common.is_ape() {
            return Err(ProbeError::FormatMismatch);
        }

        let mut file = AudioFile::new(FormatKind::Ape);

        if common.version > LAST_OLD_HEADER_VERSION {
            ApeDescriptor::parse(source)?;
            let header = ApeHeader::parse(source)?;
            file.info.set_sample_rate(header.sample_rate);
            file.info.set_channel_count(u32::from(header.channels));
            file.info.set_bits(u32::from(header.bits_per_sample));
            file.info.set_sample_count(header.sample_count());
        } else {
            let header = ApeHeaderOld::parse(source)?;
            file.info.set_sample_rate(header.sample_rate);
            file.info.set_channel_count(u32::from(header.channels));
            file.info.set_bits(header.bits());
            file.info.set_sample_count(header.sample_count());
        }

        Ok(file)
    }
}
