//! End-to-end probing through the public facade, on synthetic buffers.

use std::io::Write;

use tagprobe::{read, read_path, read_with, FormatKind, ProbeError, ReaderProperties, TagField};

fn syncsafe_bytes(value: u32) -> [u8; 4] {
    [
        (value >> 21) as u8 & 0x7F,
        (value >> 14) as u8 & 0x7F,
        (value >> 7) as u8 & 0x7F,
        value as u8 & 0x7F,
    ]
}

/// A minimal FLAC stream: magic, STREAMINFO (44100 Hz / 2 ch / 16 bit /
/// 441000 samples), then a Vorbis comment block with the given fields.
fn flac_buffer(comments: &[&str]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"fLaC");

    // STREAMINFO, not last
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x22]);
    let mut info = [0u8; 34];
    info[0..2].copy_from_slice(&4096u16.to_be_bytes());
    info[2..4].copy_from_slice(&4096u16.to_be_bytes());
    info[10] = 0x0A;
    info[11] = 0xC4;
    info[12] = 0x42;
    info[13] = 0xF0;
    info[14..18].copy_from_slice(&441_000u32.to_be_bytes());
    data.extend_from_slice(&info);

    // VORBIS_COMMENT, last
    let mut block = Vec::new();
    let vendor = b"tagprobe test";
    block.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    block.extend_from_slice(vendor);
    block.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for c in comments {
        block.extend_from_slice(&(c.len() as u32).to_le_bytes());
        block.extend_from_slice(c.as_bytes());
    }
    data.push(0x84);
    data.extend_from_slice(&(block.len() as u32).to_be_bytes()[1..4]);
    data.extend_from_slice(&block);
    data
}

/// An old-style APE header: 2 ch, 44100 Hz, v3.95 normal profile.
fn ape_buffer(total_frames: u32, final_frame_blocks: u32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"MAC ");
    data.extend_from_slice(&3950u16.to_le_bytes());
    data.extend_from_slice(&2000u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&44_100u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&total_frames.to_le_bytes());
    data.extend_from_slice(&final_frame_blocks.to_le_bytes());
    data
}

/// An ID3v2.3 tag with one Latin-1 text frame per (id, value) pair.
fn id3v2_buffer(frames: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (id, value) in frames {
        let payload_len = 1 + value.len() + 1;
        body.extend_from_slice(id.as_bytes());
        body.extend_from_slice(&(payload_len as u32).to_be_bytes());
        body.extend_from_slice(&[0x00, 0x00]);
        body.push(0x00);
        body.extend_from_slice(value.as_bytes());
        body.push(0x00);
    }

    let mut data = Vec::new();
    data.extend_from_slice(b"ID3\x03\x00\x00");
    data.extend_from_slice(&syncsafe_bytes(body.len() as u32));
    data.extend_from_slice(&body);
    data
}

#[test]
fn flac_end_to_end() {
    let data = flac_buffer(&["TITLE=Test"]);
    let file = read(&data).unwrap();
    assert_eq!(file.kind, FormatKind::Flac);
    assert_eq!(file.info.sample_rate(), 44_100);
    assert_eq!(file.info.channel_count(), 2);
    assert_eq!(file.info.bits(), 16);
    assert_eq!(file.info.sample_count(), 441_000);
    assert_eq!(file.info.duration_millis(), 10_000);
    assert_eq!(file.tags.get("TITLE"), vec!["Test"]);
}

#[test]
fn flac_merge_policies() {
    let data = flac_buffer(&[
        "ARTIST=A",
        "ARTIST=B",
        "TITLE=X",
        "TITLE=Y",
        "GENRE=Rock",
        "GENRE=Jazz",
    ]);
    let file = read(&data).unwrap();
    assert_eq!(file.tags.get_field(TagField::Artist).as_deref(), Some("A/B"));
    assert_eq!(file.tags.get_field(TagField::Title).as_deref(), Some("X"));
    assert_eq!(
        file.tags.get_field(TagField::Genre).as_deref(),
        Some("Rock/Jazz")
    );
}

#[test]
fn ape_is_reached_after_mp3_and_flac_decline() {
    // The dispatcher tries MP3 and FLAC first; both must leave the
    // origin untouched for the APE reader to see its own signature.
    let data = ape_buffer(10, 100);
    let file = read(&data).unwrap();
    assert_eq!(file.kind, FormatKind::Ape);
    assert_eq!(file.info.sample_count(), 9 * 73_728 + 100);
    assert_eq!(file.info.duration_millis(), (9 * 73_728 + 100) * 1000 / 44_100);
}

#[test]
fn mp3_with_canonical_lookup() {
    let data = id3v2_buffer(&[("TIT2", "Song"), ("TPE1", "Band"), ("TALB", "LP")]);
    let file = read(&data).unwrap();
    assert_eq!(file.kind, FormatKind::Mp3);
    assert_eq!(file.tags.get_field(TagField::Title).as_deref(), Some("Song"));
    assert_eq!(file.tags.get_field(TagField::Artist).as_deref(), Some("Band"));
    assert_eq!(file.tags.get_field(TagField::Album).as_deref(), Some("LP"));
}

#[test]
fn ncm_identity_only() {
    let mut data = b"CTENFDAM".to_vec();
    data.extend_from_slice(&[0u8; 16]);
    let file = read(&data).unwrap();
    assert_eq!(file.kind, FormatKind::Ncm);
    assert!(file.tags.is_empty());
    assert_eq!(file.info.duration_millis(), 0);
}

#[test]
fn unknown_bytes_are_unsupported() {
    let data = [0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00]; // RIFF
    assert!(matches!(read(&data), Err(ProbeError::Unsupported)));
    assert!(matches!(read(&[]), Err(ProbeError::Unsupported)));
}

#[test]
fn gbk_charset_override_through_properties() {
    // TIT2 with encoding 0x00 and GBK bytes for "你好".
    let payload = [0xC4u8, 0xE3, 0xBA, 0xC3];
    let mut body = Vec::new();
    body.extend_from_slice(b"TIT2");
    body.extend_from_slice(&(payload.len() as u32 + 1).to_be_bytes());
    body.extend_from_slice(&[0x00, 0x00]);
    body.push(0x00);
    body.extend_from_slice(&payload);

    let mut data = Vec::new();
    data.extend_from_slice(b"ID3\x03\x00\x00");
    data.extend_from_slice(&syncsafe_bytes(body.len() as u32));
    data.extend_from_slice(&body);

    let props = ReaderProperties {
        id3v2_charset: encoding_rs::GBK,
    };
    let file = read_with(&data, &props).unwrap();
    assert_eq!(file.tags.get("TIT2"), vec!["你好"]);

    // Default Latin-1 reads the same bytes as mojibake, not an error.
    let file = read(&data).unwrap();
    assert_eq!(file.tags.get("TIT2").len(), 1);
    assert_ne!(file.tags.get("TIT2"), vec!["你好"]);
}

#[test]
fn truncated_flac_fails_whole_read() {
    let mut data = flac_buffer(&["TITLE=Test"]);
    data.truncate(20); // cuts into STREAMINFO
    assert!(matches!(read(&data), Err(ProbeError::UnexpectedEof)));
}

#[test]
fn read_path_roundtrip() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&flac_buffer(&["TITLE=OnDisk"])).unwrap();
    let file = read_path(tmp.path()).unwrap();
    assert_eq!(file.kind, FormatKind::Flac);
    assert_eq!(file.tags.get("TITLE"), vec!["OnDisk"]);
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        read_path("/nonexistent/nowhere.flac"),
        Err(ProbeError::Io(_))
    ));
}
