//! FLAC metadata reading: a state machine over the metadata blocks that
//! follow the `fLaC` magic, decoding STREAMINFO bit fields and Vorbis
//! comment tags.

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::common::error::{ProbeError, Result};
use crate::common::io::ByteReader;
use crate::reader::{AudioFile, FormatKind, FormatReader, ReaderProperties};
use crate::vorbis::VorbisComment;

const MAGIC: &[u8; 4] = b"fLaC";

pub const BLOCK_TYPE_STREAMINFO: u8 = 0;
pub const BLOCK_TYPE_PADDING: u8 = 1;
pub const BLOCK_TYPE_APPLICATION: u8 = 2;
pub const BLOCK_TYPE_SEEKTABLE: u8 = 3;
pub const BLOCK_TYPE_VORBIS_COMMENT: u8 = 4;
pub const BLOCK_TYPE_CUESHEET: u8 = 5;
pub const BLOCK_TYPE_PICTURE: u8 = 6;
pub const BLOCK_TYPE_INVALID: u8 = 127;

/// A 4-byte metadata block header.
#[derive(Debug, Clone, Copy)]
pub struct BlockHeader {
    /// Set on the last metadata block before the audio frames.
    pub is_last: bool,
    pub block_type: u8,
    /// Block length in bytes, excluding this header.
    pub length: u32,
}

impl BlockHeader {
    pub fn parse(source: &mut ByteReader<'_>) -> Result<Self> {
        let bytes = source.read_bytes(4)?;
        Ok(BlockHeader {
            is_last: bytes[0] & 0x80 != 0,
            block_type: bytes[0] & 0x7F,
            length: BigEndian::read_u24(&bytes[1..4]),
        })
    }
}

/// The mandatory STREAMINFO block: 34 bytes of tightly packed fields, with
/// several values straddling byte boundaries.
#[derive(Debug, Clone)]
pub struct FlacStreamInfo {
    /// Minimum block size in samples.
    pub min_block_size: u16,
    /// Maximum block size in samples.
    pub max_block_size: u16,
    /// Minimum frame size in bytes.
    pub min_frame_size: u32,
    /// Maximum frame size in bytes.
    pub max_frame_size: u32,
    /// Up to 655350 Hz in 20 bits.
    pub sample_rate: u32,
    /// 1 to 8.
    pub channel_count: u32,
    /// Bits per sample, 4 to 32.
    pub bits: u32,
    /// 36-bit inter-channel sample count.
    pub sample_count: u64,
    /// MD5 of the unencoded audio data. Stored, not validated.
    pub audio_md5: [u8; 16],
}

impl FlacStreamInfo {
    pub fn parse(b: &[u8]) -> Result<Self> {
        if b.len() < 34 {
            return Err(ProbeError::Malformed(format!(
                "STREAMINFO block of {} bytes",
                b.len()
            )));
        }

        let sample_rate = (u32::from(b[10]) << 12) | (u32::from(b[11]) << 4) | (u32::from(b[12]) >> 4);
        let channel_count = ((u32::from(b[12]) & 0x0F) >> 1) + 1;
        let bits = (((u32::from(b[12]) & 0x01) << 4) | (u32::from(b[13]) >> 4)) + 1;
        let sample_count = (u64::from(b[13] & 0x0F) << 32) | u64::from(BigEndian::read_u32(&b[14..18]));

        let mut audio_md5 = [0u8; 16];
        audio_md5.copy_from_slice(&b[18..34]);

        Ok(FlacStreamInfo {
            min_block_size: BigEndian::read_u16(&b[0..2]),
            max_block_size: BigEndian::read_u16(&b[2..4]),
            min_frame_size: BigEndian::read_u24(&b[4..7]),
            max_frame_size: BigEndian::read_u24(&b[7..10]),
            sample_rate,
            channel_count,
            bits,
            sample_count,
            audio_md5,
        })
    }
}

pub(crate) struct FlacReader;

impl FlacReader {
    fn read_stream_info(
        &self,
        source: &mut ByteReader<'_>,
        header: BlockHeader,
        file: &mut AudioFile,
    ) -> Result<()> {
        let block = source.read_bytes(header.length as usize)?;
        let stream_info = FlacStreamInfo::parse(block)?;

        file.info.set_sample_rate(stream_info.sample_rate);
        file.info.set_channel_count(stream_info.channel_count);
        file.info.set_bits(stream_info.bits);
        file.info.set_sample_count(stream_info.sample_count);
        Ok(())
    }

    fn read_vorbis_comment(&self, source: &mut ByteReader<'_>, file: &mut AudioFile) -> Result<()> {
        let comment = VorbisComment::parse(source)?;
        for (field, value) in comment.fields() {
            file.tags.add(field, value);
        }
        Ok(())
    }
}

impl FormatReader for FlacReader {
    fn matches(&self, source: &ByteReader<'_>) -> bool {
        let mut peek = source.peek();
        matches!(peek.read_bytes(4), Ok(magic) if magic == MAGIC)
    }

    fn fetch(&self, source: &mut ByteReader<'_>, _props: &ReaderProperties) -> Result<AudioFile> {
        if source.read_bytes(4)? != MAGIC {
            return Err(ProbeError::FormatMismatch);
        }

        let mut file = AudioFile::new(FormatKind::Flac);

        loop {
            let header = BlockHeader::parse(source)?;

            match header.block_type {
                BLOCK_TYPE_STREAMINFO => self.read_stream_info(source, header, &mut file)?,
                BLOCK_TYPE_VORBIS_COMMENT => self.read_vorbis_comment(source, &mut file)?,
                other => {
                    debug!("skipping FLAC block type {other} ({} bytes)", header.length);
                    source.skip(header.length as usize)?;
                }
            }

            if header.is_last {
                break;
            }
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// STREAMINFO body for 44100 Hz / 2 ch / 16 bit / 441000 samples.
    fn stream_info_block() -> [u8; 34] {
        let mut b = [0u8; 34];
        b[0..2].copy_from_slice(&4096u16.to_be_bytes());
        b[2..4].copy_from_slice(&4096u16.to_be_bytes());
        // sample rate 44100 = 0x0AC44 across bytes 10-12
        b[10] = 0x0A;
        b[11] = 0xC4;
        // high nibble: low 4 bits of sample rate; then 3 bits channels-1, 1 bit bits-1 MSB
        b[12] = 0x40 | 0x02;
        // bits-1 low nibble, sample count bits 35-32
        b[13] = 0xF0;
        b[14..18].copy_from_slice(&441_000u32.to_be_bytes());
        b
    }

    #[test]
    fn block_header_bitfields() {
        let data = [0x84, 0x00, 0x00, 0x22];
        let mut r = ByteReader::new(&data);
        let header = BlockHeader::parse(&mut r).unwrap();
        assert!(header.is_last);
        assert_eq!(header.block_type, BLOCK_TYPE_VORBIS_COMMENT);
        assert_eq!(header.length, 34);
    }

    #[test]
    fn stream_info_bit_packing() {
        let info = FlacStreamInfo::parse(&stream_info_block()).unwrap();
        assert_eq!(info.min_block_size, 4096);
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.channel_count, 2);
        assert_eq!(info.bits, 16);
        assert_eq!(info.sample_count, 441_000);
    }

    #[test]
    fn stream_info_wide_fields() {
        // 96 kHz / 8 ch / 24 bit / a sample count needing bit 32.
        let mut b = [0u8; 34];
        let rate = 96_000u32;
        b[10] = (rate >> 12) as u8;
        b[11] = (rate >> 4) as u8;
        b[12] = ((rate as u8 & 0x0F) << 4) | (7 << 1) | 1;
        b[13] = (7 << 4) | 0x01;
        b[14..18].copy_from_slice(&0u32.to_be_bytes());
        let info = FlacStreamInfo::parse(&b).unwrap();
        assert_eq!(info.sample_rate, 96_000);
        assert_eq!(info.channel_count, 8);
        assert_eq!(info.bits, 24);
        assert_eq!(info.sample_count, 1 << 32);
    }

    #[test]
    fn undersized_stream_info_is_malformed() {
        assert!(matches!(
            FlacStreamInfo::parse(&[0u8; 20]),
            Err(ProbeError::Malformed(_))
        ));
    }
}
