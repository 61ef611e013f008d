//! Property extraction from free-text release strings.
//!
//! Some catalogs only expose a release name like
//! `Show.Name.S01E02.720p.HDTV.x264-GROUP` instead of structured fields.
//! [`guess_property`] reports whether such a string implies that a given
//! video attribute matches, resolving alias spellings (`hevc` vs `x265`,
//! `web-dl` vs `webdl`) that plain substring containment misses.

use crate::matching::MatchAttribute;
use crate::video::Video;

/// Alias groups: tokens within a group name the same thing.
const RESOLUTION_ALIASES: &[&[&str]] = &[
    &["2160p", "4k", "uhd"],
    &["1080p"],
    &["1080i"],
    &["720p"],
    &["576p"],
    &["480p"],
];

const FORMAT_ALIASES: &[&[&str]] = &[
    &["bluray", "blu-ray", "bdrip", "brrip"],
    &["web-dl", "webdl"],
    &["webrip", "web-rip"],
    &["hdtv"],
    &["dvdrip"],
    &["dvd"],
];

const VIDEO_CODEC_ALIASES: &[&[&str]] = &[
    &["x264", "h264", "h.264", "avc"],
    &["x265", "h265", "h.265", "hevc"],
    &["xvid"],
    &["divx"],
];

const AUDIO_CODEC_ALIASES: &[&[&str]] = &[
    &["ac3", "dd5.1"],
    &["dts"],
    &["truehd", "true-hd"],
    &["atmos"],
    &["aac"],
    &["flac"],
    &["mp3"],
];

/// Whether `text` contains the video's value for the attribute, directly or
/// through an alias spelling.
fn implied(text: &str, value: &str, aliases: &[&[&str]]) -> bool {
    let text = text.to_lowercase();
    let value = value.to_lowercase();
    for group in aliases {
        if group.contains(&value.as_str()) {
            return group.iter().any(|alias| text.contains(alias));
        }
    }
    text.contains(&value)
}

/// Whether a free-text release string implies that `attribute` matches the
/// video. Attributes with no free-text representation always report false.
pub fn guess_property(free_text: &str, attribute: MatchAttribute, video: &Video) -> bool {
    if free_text.trim().is_empty() {
        return false;
    }
    match attribute {
        MatchAttribute::ReleaseGroup => video
            .release_group()
            .map(|group| free_text.to_lowercase().contains(&group.to_lowercase()))
            .unwrap_or(false),
        MatchAttribute::Resolution => video
            .resolution()
            .map(|value| implied(free_text, value, RESOLUTION_ALIASES))
            .unwrap_or(false),
        MatchAttribute::Format => video
            .format()
            .map(|value| implied(free_text, value, FORMAT_ALIASES))
            .unwrap_or(false),
        MatchAttribute::VideoCodec => video
            .video_codec()
            .map(|value| implied(free_text, value, VIDEO_CODEC_ALIASES))
            .unwrap_or(false),
        MatchAttribute::AudioCodec => video
            .audio_codec()
            .map(|value| implied(free_text, value, AUDIO_CODEC_ALIASES))
            .unwrap_or(false),
        _ => false,
    }
}
