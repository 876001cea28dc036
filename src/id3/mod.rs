//! ID3v2 tag structures shared by the MP3 reader: tag header, extended
//! header, frame header and the frame payload text decoding rules.

pub mod frames;

mod frame;
mod header;

pub use frame::{synchronize, FrameKind, Id3v2FrameHeader, TextEncoding};
pub use header::{syncsafe_u28, Id3v2ExtendedHeader, Id3v2Header, Id3v2HeaderFlags};
