//! The closed vocabulary of attributes a candidate subtitle can match.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::video::MediaKind;

/// An attribute shared between a video and a candidate subtitle.
///
/// Matching only ever produces attributes from this set; the score equations
/// assign a weight to every member for the media kind they apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAttribute {
    Series,
    Season,
    Episode,
    Title,
    Year,
    ReleaseGroup,
    Resolution,
    Format,
    VideoCodec,
    AudioCodec,
    Hash,
    ImdbId,
    TvdbId,
}

/// Attributes an episode candidate can match, in equation-system order.
pub const EPISODE_ATTRIBUTES: [MatchAttribute; 13] = [
    MatchAttribute::ReleaseGroup,
    MatchAttribute::Resolution,
    MatchAttribute::Format,
    MatchAttribute::VideoCodec,
    MatchAttribute::AudioCodec,
    MatchAttribute::ImdbId,
    MatchAttribute::Hash,
    MatchAttribute::Series,
    MatchAttribute::TvdbId,
    MatchAttribute::Season,
    MatchAttribute::Episode,
    MatchAttribute::Title,
    MatchAttribute::Year,
];

/// Attributes a movie candidate can match.
pub const MOVIE_ATTRIBUTES: [MatchAttribute; 9] = [
    MatchAttribute::ReleaseGroup,
    MatchAttribute::Resolution,
    MatchAttribute::Format,
    MatchAttribute::VideoCodec,
    MatchAttribute::AudioCodec,
    MatchAttribute::ImdbId,
    MatchAttribute::Hash,
    MatchAttribute::Title,
    MatchAttribute::Year,
];

impl MatchAttribute {
    /// Stable lowercase name, used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            MatchAttribute::Series => "series",
            MatchAttribute::Season => "season",
            MatchAttribute::Episode => "episode",
            MatchAttribute::Title => "title",
            MatchAttribute::Year => "year",
            MatchAttribute::ReleaseGroup => "release_group",
            MatchAttribute::Resolution => "resolution",
            MatchAttribute::Format => "format",
            MatchAttribute::VideoCodec => "video_codec",
            MatchAttribute::AudioCodec => "audio_codec",
            MatchAttribute::Hash => "hash",
            MatchAttribute::ImdbId => "imdb_id",
            MatchAttribute::TvdbId => "tvdb_id",
        }
    }

    /// The attribute vocabulary for a media kind.
    pub fn vocabulary(kind: MediaKind) -> &'static [MatchAttribute] {
        match kind {
            MediaKind::Episode => &EPISODE_ATTRIBUTES,
            MediaKind::Movie => &MOVIE_ATTRIBUTES,
        }
    }
}

impl fmt::Display for MatchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_are_distinct_sets() {
        let episode: std::collections::HashSet<_> = EPISODE_ATTRIBUTES.into_iter().collect();
        let movie: std::collections::HashSet<_> = MOVIE_ATTRIBUTES.into_iter().collect();
        assert_eq!(episode.len(), EPISODE_ATTRIBUTES.len());
        assert_eq!(movie.len(), MOVIE_ATTRIBUTES.len());
        assert!(movie.iter().all(|a| episode.contains(a)));
    }

    #[test]
    fn test_movie_vocabulary_has_no_series_attributes() {
        assert!(!MOVIE_ATTRIBUTES.contains(&MatchAttribute::Series));
        assert!(!MOVIE_ATTRIBUTES.contains(&MatchAttribute::Season));
        assert!(!MOVIE_ATTRIBUTES.contains(&MatchAttribute::Episode));
        assert!(!MOVIE_ATTRIBUTES.contains(&MatchAttribute::TvdbId));
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&MatchAttribute::ReleaseGroup).unwrap();
        assert_eq!(json, "\"release_group\"");
        assert_eq!(MatchAttribute::ReleaseGroup.to_string(), "release_group");
    }
}
