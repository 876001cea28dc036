//! ID3v2.3 declared frame IDs this crate cares about, either for
//! classification or for the canonical tag-field mapping.

/// Comments.
pub const COMM: &str = "COMM";

/// Synchronized lyric/text.
pub const SYLT: &str = "SYLT";

/// Album/Movie/Show title.
pub const TALB: &str = "TALB";

/// Composer.
pub const TCOM: &str = "TCOM";

/// Content type (genre).
pub const TCON: &str = "TCON";

/// Content group description.
pub const TIT1: &str = "TIT1";

/// Title/songname/content description.
pub const TIT2: &str = "TIT2";

/// Subtitle/Description refinement.
pub const TIT3: &str = "TIT3";

/// Length.
pub const TLEN: &str = "TLEN";

/// Lead performer(s)/Soloist(s).
pub const TPE1: &str = "TPE1";

/// Band/orchestra/accompaniment (album artist).
pub const TPE2: &str = "TPE2";

/// Conductor/performer refinement.
pub const TPE3: &str = "TPE3";

/// Interpreted, remixed, or otherwise modified by.
pub const TPE4: &str = "TPE4";

/// Track number/Position in set.
pub const TRCK: &str = "TRCK";

/// Software/Hardware and settings used for encoding.
pub const TSSE: &str = "TSSE";

/// Year.
pub const TYER: &str = "TYER";

/// User defined text information frame.
pub const TXXX: &str = "TXXX";

/// Unsynchronized lyric/text transcription.
pub const USLT: &str = "USLT";
