//! MP3 reading: the file-level driver for the ID3v2 decoders. MP3 files
//! sometimes carry several ID3v2 tags back to back, so tag parsing loops
//! until the next ten bytes stop looking like a tag header.

use log::{debug, warn};

use crate::common::error::{ProbeError, Result};
use crate::common::io::ByteReader;
use crate::id3::{FrameKind, Id3v2ExtendedHeader, Id3v2FrameHeader, Id3v2Header};
use crate::reader::{AudioFile, FormatKind, FormatReader, ReaderProperties};

pub(crate) struct Mp3Reader;

impl Mp3Reader {
    /// Walk one tag's frame region and collect its text-bearing frames.
    fn read_tag(
        &self,
        source: &mut ByteReader<'_>,
        header: &Id3v2Header,
        props: &ReaderProperties,
        file: &mut AudioFile,
    ) -> Result<()> {
        let extended_size = if header.flags.extended_header {
            Id3v2ExtendedHeader::parse(source)?.consumed_size()
        } else {
            0
        };

        let frame_region = (header.size as usize)
            .checked_sub(extended_size as usize)
            .ok_or_else(|| {
                ProbeError::Malformed(format!(
                    "extended header of {extended_size} bytes exceeds tag size {}",
                    header.size
                ))
            })?;

        let mut consumed = 0usize;
        while consumed < frame_region {
            let frame = Id3v2FrameHeader::parse(source, header.version)?;

            if frame.is_padding() {
                consumed += 10;
                break;
            }

            if frame.compression() || frame.encryption() {
                warn!(
                    "skipping {} frame ({} bytes): compressed/encrypted payloads are not decoded",
                    frame.id_str(),
                    frame.size
                );
                source.skip(frame.size as usize)?;
            } else {
                match frame.kind() {
                    FrameKind::Text => {
                        let text = frame.read_text(source, props.id3v2_charset)?;
                        file.tags.add(frame.id_str(), text);
                    }
                    FrameKind::Comment | FrameKind::UnsynchronizedLyrics => {
                        let text = frame.read_language_text(source, props.id3v2_charset)?;
                        file.tags.add(frame.id_str(), text);
                    }
                    FrameKind::Unknown => {
                        debug!("skipping unsupported frame {}", frame.id_str());
                        source.skip(frame.size as usize)?;
                    }
                }
            }

            consumed += frame.size as usize + 10;
        }

        // Whatever the frame walk left of the declared tag size is padding.
        if consumed < frame_region {
            source.skip(frame_region - consumed)?;
        }

        Ok(())
    }
}

impl FormatReader for Mp3Reader {
    fn matches(&self, source: &ByteReader<'_>) -> bool {
        Id3v2Header::parse(&mut source.peek()).is_ok()
    }

    fn fetch(&self, source: &mut ByteReader<'_>, props: &ReaderProperties) -> Result<AudioFile> {
        let mut file = AudioFile::new(FormatKind::Mp3);

        let header = Id3v2Header::parse(source)?;
        self.read_tag(source, &header, props, &mut file)?;

        // Further tags are optional: stop quietly at the first ten bytes
        // that do not parse as a tag header.
        loop {
            let header = match Id3v2Header::parse(&mut source.peek()) {
                Ok(header) => header,
                Err(_) => break,
            };
            source.skip(10)?;
            self.read_tag(source, &header, props, &mut file)?;
        }

        Ok(file)
    }
}
