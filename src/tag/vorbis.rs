//! Vorbis comment field names as written into FLAC and Ogg metadata.
//!
//! The core set follows the Xiph recommendation
//! (<https://www.xiph.org/vorbis/doc/v-comment.html>); the last three are
//! widespread extensions rather than part of the recommendation.

/// Track/work name.
pub const TITLE: &str = "TITLE";

/// Differentiates multiple versions of the same track (e.g. remix info).
pub const VERSION: &str = "VERSION";

/// The collection name this track belongs to.
pub const ALBUM: &str = "ALBUM";

/// Track number within the collection.
pub const TRACKNUMBER: &str = "TRACKNUMBER";

/// The artist generally considered responsible for the work.
pub const ARTIST: &str = "ARTIST";

/// The artist(s) who performed the work.
pub const PERFORMER: &str = "PERFORMER";

/// Copyright attribution.
pub const COPYRIGHT: &str = "COPYRIGHT";

/// License information, e.g. a Creative Commons URL.
pub const LICENSE: &str = "LICENSE";

/// Organization producing the track (the record label).
pub const ORGANIZATION: &str = "ORGANIZATION";

/// Short text description of the contents.
pub const DESCRIPTION: &str = "DESCRIPTION";

/// Music genre.
pub const GENRE: &str = "GENRE";

/// Date the track was recorded.
pub const DATE: &str = "DATE";

/// Location where the track was recorded.
pub const LOCATION: &str = "LOCATION";

/// Contact information for the creators or distributors.
pub const CONTACT: &str = "CONTACT";

/// ISRC number for the track.
pub const ISRC: &str = "ISRC";

/// Extension: the major artist of the album.
pub const ALBUMARTIST: &str = "ALBUMARTIST";

/// Extension: the lyrics to the track.
pub const LYRICS: &str = "LYRICS";

/// Extension: the year the track was recorded.
pub const YEAR: &str = "YEAR";
