//! Shared provider types: raw catalog rows, normalized candidates and
//! search criteria.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// A show name/id pair, from the full listing or a search suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowSuggestion {
    pub name: String,
    pub id: u32,
}

/// One raw row of a season browse, cells as the catalog rendered them.
///
/// Every cell is optional: a missing or empty cell is meaningful (the
/// boolean columns are presence flags) and filtering happens downstream.
#[derive(Debug, Clone, Default)]
pub struct EpisodeRow {
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub title: Option<String>,
    pub language: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    pub hearing_impaired: Option<String>,
    pub corrected: Option<String>,
    pub hd: Option<String>,
    pub download_link: Option<String>,
    pub page_link: Option<String>,
}

/// A subtitle candidate from the show-browse catalog, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addic7edSubtitle {
    pub language: String,
    pub hearing_impaired: bool,
    pub page_link: Option<String>,
    pub series: String,
    pub season: u32,
    pub episode: u32,
    pub title: Option<String>,
    pub year: Option<i32>,
    /// Free-text release string, e.g. `"720p HDTV x264-DIMENSION"`.
    pub version: Option<String>,
    pub download_link: String,
}

/// One raw search result row from the RPC catalog, fields named and typed as
/// the wire sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenSubtitlesRow {
    #[serde(rename = "IDSubtitleFile")]
    pub id_subtitle_file: String,
    #[serde(rename = "SubLanguageID", default)]
    pub sub_language_id: String,
    #[serde(rename = "SubHearingImpaired", default)]
    pub sub_hearing_impaired: String,
    #[serde(rename = "MatchedBy", default)]
    pub matched_by: String,
    #[serde(rename = "MovieKind", default)]
    pub movie_kind: String,
    #[serde(rename = "MovieHash", default)]
    pub movie_hash: Option<String>,
    #[serde(rename = "MovieName", default)]
    pub movie_name: String,
    #[serde(rename = "MovieReleaseName", default)]
    pub movie_release_name: String,
    #[serde(rename = "MovieYear", default)]
    pub movie_year: Option<String>,
    #[serde(rename = "IDMovieImdb", default)]
    pub id_movie_imdb: Option<String>,
    #[serde(rename = "SeriesSeason", default)]
    pub series_season: Option<String>,
    #[serde(rename = "SeriesEpisode", default)]
    pub series_episode: Option<String>,
    #[serde(rename = "SubtitlesLink", default)]
    pub subtitles_link: Option<String>,
}

/// A subtitle candidate from the RPC catalog, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSubtitlesSubtitle {
    pub language: String,
    pub hearing_impaired: bool,
    pub page_link: Option<String>,
    pub id: String,
    /// Which criterion the catalog says produced this row.
    pub matched_by: String,
    /// `"episode"` or `"movie"`; anything else never matches a video.
    pub movie_kind: String,
    pub hash: Option<String>,
    pub movie_name: String,
    pub movie_release_name: String,
    pub movie_year: Option<i32>,
    pub movie_imdb_id: Option<u32>,
    pub series_season: Option<u32>,
    pub series_episode: Option<u32>,
}

/// Episode rows name the series and episode title together, quoted:
/// `"Show Name" Episode Title`.
static SERIES_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"(?P<series>.*)" (?P<title>.*)$"#).expect("series/title pattern"));

impl OpenSubtitlesSubtitle {
    /// Series name parsed out of `movie_name`, when it carries one.
    pub fn series_name(&self) -> Option<&str> {
        SERIES_TITLE
            .captures(&self.movie_name)
            .and_then(|caps| caps.name("series"))
            .map(|m| m.as_str())
    }

    /// Episode title parsed out of `movie_name`, when it carries one.
    pub fn series_title(&self) -> Option<&str> {
        SERIES_TITLE
            .captures(&self.movie_name)
            .and_then(|caps| caps.name("title"))
            .map(|m| m.as_str())
    }
}

/// Candidate metadata, polymorphic over the catalog that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateMetadata {
    Addic7ed(Addic7edSubtitle),
    OpenSubtitles(OpenSubtitlesSubtitle),
}

impl CandidateMetadata {
    /// The catalog this candidate came from.
    pub fn catalog(&self) -> &'static str {
        match self {
            CandidateMetadata::Addic7ed(_) => super::addic7ed::CATALOG_NAME,
            CandidateMetadata::OpenSubtitles(_) => super::opensubtitles::CATALOG_NAME,
        }
    }

    pub fn language(&self) -> &str {
        match self {
            CandidateMetadata::Addic7ed(s) => &s.language,
            CandidateMetadata::OpenSubtitles(s) => &s.language,
        }
    }

    pub fn hearing_impaired(&self) -> bool {
        match self {
            CandidateMetadata::Addic7ed(s) => s.hearing_impaired,
            CandidateMetadata::OpenSubtitles(s) => s.hearing_impaired,
        }
    }

    pub fn page_link(&self) -> Option<&str> {
        match self {
            CandidateMetadata::Addic7ed(s) => s.page_link.as_deref(),
            CandidateMetadata::OpenSubtitles(s) => s.page_link.as_deref(),
        }
    }
}

/// One catalog search criterion. A request is an ordered list of these, most
/// precise first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "criterion")]
pub enum SearchCriteria {
    /// Content hash plus byte size; the most precise lookup a catalog offers.
    Hash {
        hash: String,
        size: u64,
        languages: Vec<String>,
    },
    /// Cross-catalog numeric identifier.
    ImdbId { imdb_id: u32, languages: Vec<String> },
    /// Free-text query, optionally narrowed to one episode.
    Query {
        query: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        season: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        episode: Option<u32>,
        languages: Vec<String>,
    },
}
