//! Show-browse catalog provider (Addic7ed-shaped).
//!
//! The catalog has no direct episode search: a season/episode query first
//! needs the catalog's numeric show id. Shows are indexed inconsistently
//! (with or without year, with or without a regional qualifier), so the
//! resolver walks a cascade of lookup strategies and stops at the first hit.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{index_show_listing, Addic7edSubtitle, EpisodeRow, ProviderError, ShowCatalog};
use crate::matching::MatchAttribute;
use crate::release;
use crate::text;
use crate::video::Video;

pub const CATALOG_NAME: &str = "addic7ed";

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addic7edConfig {
    /// Base URL of the catalog.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
    /// How long the show index stays fresh before a whole-index rebuild.
    #[serde(default = "default_show_expiration_secs")]
    pub show_expiration_secs: u64,
}

fn default_base_url() -> String {
    "https://www.addic7ed.com".to_string()
}

fn default_timeout_secs() -> u32 {
    10
}

fn default_show_expiration_secs() -> u64 {
    86_400
}

impl Default for Addic7edConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            show_expiration_secs: default_show_expiration_secs(),
        }
    }
}

/// A resolved show id, plus the year that resolved it (only set when the
/// year-qualified pass succeeded; the candidates then carry that year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedShow {
    pub id: u32,
    pub year: Option<i32>,
}

struct ShowIndex {
    built_at: DateTime<Utc>,
    ids: HashMap<String, u32>,
}

/// Provider over any [`ShowCatalog`] transport.
pub struct Addic7edProvider<C> {
    catalog: C,
    show_expiration: Duration,
    index: RwLock<Option<ShowIndex>>,
}

impl<C: ShowCatalog> Addic7edProvider<C> {
    pub fn new(catalog: C, config: &Addic7edConfig) -> Self {
        Self {
            catalog,
            show_expiration: Duration::seconds(config.show_expiration_secs as i64),
            index: RwLock::new(None),
        }
    }

    /// The show index, rebuilt from the full listing once per expiration
    /// window. Entries are keyed by both the raw lowercase name and the
    /// condensed form.
    async fn show_ids(&self) -> Result<HashMap<String, u32>, ProviderError> {
        {
            let guard = self.index.read().await;
            if let Some(index) = guard.as_ref() {
                if Utc::now() - index.built_at < self.show_expiration {
                    return Ok(index.ids.clone());
                }
            }
        }
        let listing = self.catalog.list_shows().await?;
        let ids = index_show_listing(&listing);
        debug!(shows = listing.len(), entries = ids.len(), "show index rebuilt");
        let mut guard = self.index.write().await;
        *guard = Some(ShowIndex {
            built_at: Utc::now(),
            ids: ids.clone(),
        });
        Ok(ids)
    }

    /// Live server-side search; the first suggestion is authoritative.
    async fn find_show_id(&self, name: &str) -> Result<Option<u32>, ProviderError> {
        debug!(name = %name, "searching show on catalog");
        let suggestions = self.catalog.search_show(name).await?;
        if suggestions.is_empty() {
            info!(name = %name, "show not suggested by catalog");
            return Ok(None);
        }
        Ok(Some(suggestions[0].id))
    }

    /// One lookup pass for a single name form: cached index with the raw
    /// then condensed form, then live search with the raw then condensed
    /// form. The condensed probes are skipped when condensing changes
    /// nothing.
    async fn lookup_pass(&self, name: &str) -> Result<Option<u32>, ProviderError> {
        let condensed = text::condense_series(name);
        debug!(raw = %name, condensed = %condensed, "looking up series");
        let ids = self.show_ids().await?;
        if let Some(id) = ids.get(name) {
            return Ok(Some(*id));
        }
        if condensed != name {
            if let Some(id) = ids.get(&condensed) {
                return Ok(Some(*id));
            }
        }
        if let Some(id) = self.find_show_id(name).await? {
            return Ok(Some(id));
        }
        if condensed != name {
            return self.find_show_id(&condensed).await;
        }
        Ok(None)
    }

    /// Cascading resolution of a series name to the catalog's show id.
    ///
    /// Strictly ordered, first success wins: the year-qualified form (any
    /// existing parenthesized qualifier stripped first), then the name as
    /// given, then the name with its parenthesized qualifier stripped. A
    /// fully exhausted cascade is a normal not-found outcome.
    pub async fn resolve_show_id(
        &self,
        series: &str,
        year: Option<i32>,
    ) -> Result<Option<ResolvedShow>, ProviderError> {
        let lower = series.to_lowercase();
        if let Some(y) = year {
            let qualified = format!("{} ({y})", text::strip_qualifier(&lower));
            if let Some(id) = self.lookup_pass(&qualified).await? {
                return Ok(Some(ResolvedShow { id, year: Some(y) }));
            }
        }
        if let Some(id) = self.lookup_pass(&lower).await? {
            return Ok(Some(ResolvedShow { id, year: None }));
        }
        let stripped = text::strip_qualifier(&lower);
        if stripped != lower {
            if let Some(id) = self.lookup_pass(&stripped).await? {
                return Ok(Some(ResolvedShow { id, year: None }));
            }
        }
        info!(series = %series, "series not found in catalog");
        Ok(None)
    }

    /// Search subtitles for one episode.
    ///
    /// An unresolvable series yields zero candidates, not an error.
    pub async fn query(
        &self,
        languages: &[String],
        series: &str,
        season: u32,
        episode: u32,
        year: Option<i32>,
    ) -> Result<Vec<Addic7edSubtitle>, ProviderError> {
        let Some(show) = self.resolve_show_id(series, year).await? else {
            return Ok(Vec::new());
        };
        debug!(show_id = show.id, season, "browsing season");
        let rows = self.catalog.browse_season(show.id, season).await?;
        let subtitles: Vec<_> = rows
            .into_iter()
            .filter_map(|row| accept_row(row, languages, episode))
            .map(|row| normalize_row(row, series, show.year))
            .collect();
        debug!(candidates = subtitles.len(), "season browse filtered");
        Ok(subtitles)
    }

    /// All candidates for a video. This catalog only hosts episodes; movie
    /// videos yield zero candidates.
    pub async fn list_candidates(
        &self,
        video: &Video,
        languages: &[String],
    ) -> Result<Vec<super::CandidateMetadata>, ProviderError> {
        match video {
            Video::Episode(v) => Ok(self
                .query(languages, &v.series, v.season, v.episode, v.year)
                .await?
                .into_iter()
                .map(super::CandidateMetadata::Addic7ed)
                .collect()),
            Video::Movie(_) => {
                debug!(catalog = CATALOG_NAME, "catalog hosts episodes only");
                Ok(Vec::new())
            }
        }
    }
}

/// Pre-matching row filter: incomplete subtitles, rows without a language
/// (language is a mandatory filter), rows without season/episode numbers and
/// rows for other episodes or unwanted languages never become candidates.
fn accept_row(row: EpisodeRow, languages: &[String], episode: u32) -> Option<EpisodeRow> {
    if row.status.as_deref() != Some("Completed") {
        return None;
    }
    let language = row.language.as_deref().unwrap_or("");
    if language.is_empty() {
        return None;
    }
    if !languages.iter().any(|l| l.eq_ignore_ascii_case(language)) {
        return None;
    }
    let (Some(_), Some(row_episode)) = (row.season, row.episode) else {
        return None;
    };
    if row_episode != episode {
        return None;
    }
    row.download_link.as_deref()?;
    Some(row)
}

/// Build the normalized candidate out of an accepted row. The boolean
/// columns are presence flags: any cell content means true.
fn normalize_row(row: EpisodeRow, series: &str, year: Option<i32>) -> Addic7edSubtitle {
    Addic7edSubtitle {
        language: row.language.unwrap_or_default(),
        hearing_impaired: row.hearing_impaired.is_some_and(|s| !s.is_empty()),
        page_link: row.page_link,
        series: series.to_string(),
        season: row.season.unwrap_or_default(),
        episode: row.episode.unwrap_or_default(),
        title: row.title,
        year,
        version: row.version,
        download_link: row.download_link.unwrap_or_default(),
    }
}

/// Matched attributes of an episode candidate against a video.
///
/// Comparisons are independent; a missing field on either side is a
/// non-match for that attribute. This catalog reports the series year, which
/// is reliable, so year participates in matching.
pub fn compute_matches(video: &Video, subtitle: &Addic7edSubtitle) -> HashSet<MatchAttribute> {
    let mut matches = HashSet::new();
    let Video::Episode(episode) = video else {
        info!(
            catalog = CATALOG_NAME,
            "episode candidate evaluated against a movie video"
        );
        return matches;
    };
    if text::normalized_eq(&episode.series, &subtitle.series) {
        matches.insert(MatchAttribute::Series);
    }
    if episode.season == subtitle.season {
        matches.insert(MatchAttribute::Season);
    }
    if episode.episode == subtitle.episode {
        matches.insert(MatchAttribute::Episode);
    }
    if let (Some(video_title), Some(row_title)) =
        (episode.title.as_deref(), subtitle.title.as_deref())
    {
        if text::normalized_eq(video_title, row_title) {
            matches.insert(MatchAttribute::Title);
        }
    }
    if let (Some(video_year), Some(row_year)) = (episode.year, subtitle.year) {
        if video_year == row_year {
            matches.insert(MatchAttribute::Year);
        }
    }
    if let Some(version) = subtitle.version.as_deref() {
        if let Some(group) = episode.release_group.as_deref() {
            if version.to_lowercase().contains(&group.to_lowercase()) {
                matches.insert(MatchAttribute::ReleaseGroup);
            }
        }
        for attr in [
            MatchAttribute::Resolution,
            MatchAttribute::Format,
            MatchAttribute::VideoCodec,
            MatchAttribute::AudioCodec,
        ] {
            if release::guess_property(version, attr, video) {
                matches.insert(attr);
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockShowCatalog;
    use crate::video::EpisodeVideo;

    fn provider(catalog: MockShowCatalog) -> Addic7edProvider<MockShowCatalog> {
        Addic7edProvider::new(catalog, &Addic7edConfig::default())
    }

    fn video() -> Video {
        Video::Episode(EpisodeVideo {
            series: "Show Name".to_string(),
            season: 1,
            episode: 2,
            title: Some("The Second One".to_string()),
            year: Some(2020),
            release_group: Some("DIMENSION".to_string()),
            resolution: Some("720p".to_string()),
            format: Some("HDTV".to_string()),
            video_codec: Some("x264".to_string()),
            audio_codec: None,
            hashes: Default::default(),
            size: None,
            imdb_id: None,
        })
    }

    fn subtitle(version: Option<&str>) -> Addic7edSubtitle {
        Addic7edSubtitle {
            language: "English".to_string(),
            hearing_impaired: false,
            page_link: None,
            series: "Show Name".to_string(),
            season: 1,
            episode: 2,
            title: Some("The Second One".to_string()),
            year: Some(2020),
            version: version.map(String::from),
            download_link: "/original/1/0".to_string(),
        }
    }

    fn completed_row(season: u32, episode: u32, language: &str) -> EpisodeRow {
        EpisodeRow {
            season: Some(season),
            episode: Some(episode),
            title: Some("The Second One".to_string()),
            language: Some(language.to_string()),
            version: Some("720p HDTV x264-DIMENSION".to_string()),
            status: Some("Completed".to_string()),
            hearing_impaired: Some(String::new()),
            corrected: None,
            hd: Some("x".to_string()),
            download_link: Some("/original/1/0".to_string()),
            page_link: Some("https://example.org/ep/1".to_string()),
        }
    }

    #[test]
    fn test_compute_matches_full() {
        let matches = compute_matches(&video(), &subtitle(Some("720p HDTV x264-DIMENSION")));
        for attr in [
            MatchAttribute::Series,
            MatchAttribute::Season,
            MatchAttribute::Episode,
            MatchAttribute::Title,
            MatchAttribute::Year,
            MatchAttribute::ReleaseGroup,
            MatchAttribute::Resolution,
            MatchAttribute::Format,
            MatchAttribute::VideoCodec,
        ] {
            assert!(matches.contains(&attr), "missing {attr}");
        }
        // No audio codec on the video: nothing to compare against.
        assert!(!matches.contains(&MatchAttribute::AudioCodec));
    }

    #[test]
    fn test_compute_matches_without_version() {
        let matches = compute_matches(&video(), &subtitle(None));
        assert!(matches.contains(&MatchAttribute::Series));
        assert!(!matches.contains(&MatchAttribute::ReleaseGroup));
        assert!(!matches.contains(&MatchAttribute::Resolution));
    }

    #[test]
    fn test_compute_matches_kind_mismatch_is_empty() {
        let movie = Video::Movie(crate::video::MovieVideo {
            title: "Show Name".to_string(),
            year: Some(2020),
            release_group: None,
            resolution: None,
            format: None,
            video_codec: None,
            audio_codec: None,
            hashes: Default::default(),
            size: None,
            imdb_id: None,
        });
        assert!(compute_matches(&movie, &subtitle(Some("720p"))).is_empty());
    }

    #[test]
    fn test_compute_matches_failed_comparison_does_not_abort_others() {
        let mut sub = subtitle(Some("1080p WEB-DL x265-OTHER"));
        sub.season = 9;
        let matches = compute_matches(&video(), &sub);
        assert!(matches.contains(&MatchAttribute::Series));
        assert!(matches.contains(&MatchAttribute::Episode));
        assert!(!matches.contains(&MatchAttribute::Season));
        assert!(!matches.contains(&MatchAttribute::Resolution));
    }

    #[tokio::test]
    async fn test_resolve_from_cached_index_condensed_form() {
        let catalog = MockShowCatalog::new();
        catalog.set_shows(vec![("Marvel's Agents of S.H.I.E.L.D.", 4010)]);
        let provider = provider(catalog);
        let resolved = provider
            .resolve_show_id("marvels agents of shield", None)
            .await
            .unwrap();
        assert_eq!(resolved, Some(ResolvedShow { id: 4010, year: None }));
        // The index was built once; no live search was needed.
        assert!(provider.catalog.recorded_searches().await.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_year_qualified_index_hit() {
        let catalog = MockShowCatalog::new();
        catalog.set_shows(vec![("Show Name (2020)", 77)]);
        let provider = provider(catalog);
        let resolved = provider
            .resolve_show_id("Show Name", Some(2020))
            .await
            .unwrap();
        assert_eq!(
            resolved,
            Some(ResolvedShow {
                id: 77,
                year: Some(2020)
            })
        );
    }

    #[tokio::test]
    async fn test_resolution_cascade_strips_qualifier_last() {
        // No index entry and no remote suggestion for the year-qualified or
        // bare forms; the qualifier-stripped remote search finally resolves.
        let catalog = MockShowCatalog::new();
        catalog.set_shows(vec![("Unrelated Show", 1)]);
        catalog.set_suggestions("show name", vec![("Show Name", 42)]);
        let provider = provider(catalog);
        let resolved = provider
            .resolve_show_id("Show Name (US)", Some(2020))
            .await
            .unwrap();
        assert_eq!(resolved, Some(ResolvedShow { id: 42, year: None }));
        let searches = provider.catalog.recorded_searches().await;
        // Year-qualified pass, bare pass, stripped pass (hits). Condensing
        // changes nothing for these forms, so each pass searches once.
        assert_eq!(
            searches,
            vec![
                "show name (2020)".to_string(),
                "show name (us)".to_string(),
                "show name".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolution_exhausted_without_qualifier_is_not_found() {
        let catalog = MockShowCatalog::new();
        let provider = provider(catalog);
        let resolved = provider.resolve_show_id("Show Name", None).await.unwrap();
        assert_eq!(resolved, None);
        // No qualifier to strip and no year: exactly one pass.
        let searches = provider.catalog.recorded_searches().await;
        assert_eq!(searches, vec!["show name".to_string()]);
    }

    #[tokio::test]
    async fn test_query_filters_rows() {
        let catalog = MockShowCatalog::new();
        catalog.set_shows(vec![("Show Name", 42)]);
        let mut incomplete = completed_row(1, 2, "English");
        incomplete.status = Some("60%".to_string());
        let mut no_language = completed_row(1, 2, "English");
        no_language.language = Some(String::new());
        let wrong_episode = completed_row(1, 3, "English");
        let unwanted_language = completed_row(1, 2, "French");
        catalog.set_rows(
            42,
            1,
            vec![
                completed_row(1, 2, "English"),
                incomplete,
                no_language,
                wrong_episode,
                unwanted_language,
            ],
        );
        let provider = provider(catalog);
        let subtitles = provider
            .query(&["english".to_string()], "Show Name", 1, 2, None)
            .await
            .unwrap();
        assert_eq!(subtitles.len(), 1);
        assert_eq!(subtitles[0].language, "English");
        assert_eq!(subtitles[0].episode, 2);
        // Empty hearing-impaired cell means not hearing impaired.
        assert!(!subtitles[0].hearing_impaired);
    }

    #[tokio::test]
    async fn test_query_unresolved_series_yields_no_candidates() {
        let catalog = MockShowCatalog::new();
        let provider = provider(catalog);
        let subtitles = provider
            .query(&["english".to_string()], "Show Name", 1, 2, None)
            .await
            .unwrap();
        assert!(subtitles.is_empty());
    }

    #[tokio::test]
    async fn test_show_index_is_cached_within_expiration() {
        let catalog = MockShowCatalog::new();
        catalog.set_shows(vec![("Show Name", 42)]);
        let provider = provider(catalog);
        provider.resolve_show_id("Show Name", None).await.unwrap();
        provider.resolve_show_id("Show Name", None).await.unwrap();
        assert_eq!(provider.catalog.listing_calls().await, 1);
    }

    #[tokio::test]
    async fn test_movie_video_yields_no_candidates() {
        let catalog = MockShowCatalog::new();
        let provider = provider(catalog);
        let movie = Video::Movie(crate::video::MovieVideo {
            title: "Some Film".to_string(),
            year: None,
            release_group: None,
            resolution: None,
            format: None,
            video_codec: None,
            audio_codec: None,
            hashes: Default::default(),
            size: None,
            imdb_id: None,
        });
        let candidates = provider
            .list_candidates(&movie, &["english".to_string()])
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }
}
