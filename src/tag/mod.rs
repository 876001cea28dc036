pub mod vorbis;

use crate::id3::frames;
use crate::tag::vorbis as vc;

/// Separator used when a canonical field joins multiple raw values.
pub const SEPARATOR: &str = "/";

/// How multiple raw values collapse into one canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Take the first matching raw value.
    First,
    /// Join every matching raw value with [`SEPARATOR`].
    Join,
}

/// Canonical tag fields, each mapped onto the raw identifiers the source
/// vocabularies use for it (Vorbis comment name, ID3v2 frame IDs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Genre,
    Lyrics,
    TrackNumber,
    Year,
}

impl TagField {
    /// The raw field identifiers that map onto this canonical field.
    pub fn raw_names(self) -> &'static [&'static str] {
        match self {
            TagField::Title => &[vc::TITLE, frames::TIT2],
            TagField::Artist => &[vc::ARTIST, frames::TPE1],
            TagField::Album => &[vc::ALBUM, frames::TALB],
            TagField::AlbumArtist => &[vc::ALBUMARTIST, frames::TPE2],
            TagField::Genre => &[vc::GENRE, frames::TCON],
            TagField::Lyrics => &[vc::LYRICS, frames::SYLT, frames::USLT],
            TagField::TrackNumber => &[vc::TRACKNUMBER, frames::TRCK],
            TagField::Year => &[vc::YEAR, frames::TYER],
        }
    }

    /// Per-field merge policy. Artist and Genre join their values; every
    /// other field takes the first one. Carried over from the source
    /// vocabulary this crate normalizes; callers that disagree can use
    /// [`TagStore::get_field_with`].
    pub fn merge_policy(self) -> MergePolicy {
        match self {
            TagField::Artist | TagField::Genre => MergePolicy::Join,
            _ => MergePolicy::First,
        }
    }
}

/// Ordered multimap of raw (field, value) tag pairs.
///
/// A `Vec` rather than a map: some formats legitimately emit the same field
/// several times (multiple ARTIST entries in a FLAC comment block, for
/// example), and insertion order is part of the data.
#[derive(Debug, Default, Clone)]
pub struct TagStore {
    entries: Vec<(String, String)>,
}

impl TagStore {
    pub(crate) fn add(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.entries.push((field.into(), value.into()));
    }

    /// All values recorded for a raw field name, in insertion order.
    pub fn get(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Canonical lookup under the field's own merge policy.
    pub fn get_field(&self, field: TagField) -> Option<String> {
        self.get_field_with(field, field.merge_policy())
    }

    /// Canonical lookup under an explicit merge policy.
    pub fn get_field_with(&self, field: TagField, policy: MergePolicy) -> Option<String> {
        let names = field.raw_names();
        let mut matches = self
            .entries
            .iter()
            .filter(|(name, _)| names.contains(&name.as_str()))
            .map(|(_, value)| value.as_str());

        match policy {
            MergePolicy::First => matches.next().map(str::to_owned),
            MergePolicy::Join => {
                let joined = matches.collect::<Vec<_>>().join(SEPARATOR);
                if joined.is_empty() {
                    None
                } else {
                    Some(joined)
                }
            }
        }
    }

    /// The raw (field, value) pairs in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
