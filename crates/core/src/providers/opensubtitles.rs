//! Multi-criteria catalog provider (OpenSubtitles-shaped).
//!
//! The catalog accepts a direct search with several criteria at once, so no
//! id-then-browse flow is needed. Criteria are ordered by precision: a
//! verified content hash first, then the cross-catalog imdb id, then a
//! free-text query.

use std::collections::HashSet;

use tracing::{debug, info};

use super::{
    CandidateMetadata, CriteriaCatalog, OpenSubtitlesRow, OpenSubtitlesSubtitle, ProviderError,
    ProviderErrorKind, SearchCriteria,
};
use crate::matching::MatchAttribute;
use crate::release;
use crate::text;
use crate::video::Video;

pub const CATALOG_NAME: &str = "opensubtitles";

/// Provider over any [`CriteriaCatalog`] transport.
pub struct OpenSubtitlesProvider<C> {
    catalog: C,
}

impl<C: CriteriaCatalog> OpenSubtitlesProvider<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// All candidates for a video, in catalog order.
    pub async fn list_candidates(
        &self,
        video: &Video,
        languages: &[String],
    ) -> Result<Vec<CandidateMetadata>, ProviderError> {
        let criteria = criteria_for(video, languages)?;
        debug!(criteria = criteria.len(), "searching catalog");
        let rows = self.catalog.search(&criteria).await?;
        let candidates: Vec<_> = rows
            .into_iter()
            .filter_map(normalize_row)
            .map(CandidateMetadata::OpenSubtitles)
            .collect();
        debug!(candidates = candidates.len(), "search rows normalized");
        Ok(candidates)
    }
}

/// Ordered criteria for a video: hash+size, imdb id, free-text query.
pub fn criteria_for(
    video: &Video,
    languages: &[String],
) -> Result<Vec<SearchCriteria>, ProviderError> {
    let (query, season, episode) = match video {
        Video::Episode(v) => (
            Some(text::strip_qualifier(&v.series)),
            Some(v.season),
            Some(v.episode),
        ),
        Video::Movie(v) => (Some(v.title.clone()), None, None),
    };
    assemble_criteria(
        video.hash_for(CATALOG_NAME).map(|h| (h, video.size())),
        video.imdb_id(),
        query.as_deref(),
        season,
        episode,
        languages,
    )
}

/// Build the ordered criteria list from the individual lookup keys.
///
/// A request with no usable criterion is a caller bug, reported as
/// [`ProviderErrorKind::MissingSearchCriteria`].
pub fn assemble_criteria(
    hash: Option<(&str, Option<u64>)>,
    imdb_id: Option<u32>,
    query: Option<&str>,
    season: Option<u32>,
    episode: Option<u32>,
    languages: &[String],
) -> Result<Vec<SearchCriteria>, ProviderError> {
    let languages = languages.to_vec();
    let mut criteria = Vec::new();
    if let Some((hash, Some(size))) = hash {
        criteria.push(SearchCriteria::Hash {
            hash: hash.to_string(),
            size,
            languages: languages.clone(),
        });
    }
    if let Some(imdb_id) = imdb_id {
        criteria.push(SearchCriteria::ImdbId {
            imdb_id,
            languages: languages.clone(),
        });
    }
    if let Some(query) = query {
        criteria.push(SearchCriteria::Query {
            query: query.to_string(),
            season,
            episode,
            languages,
        });
    }
    if criteria.is_empty() {
        return Err(ProviderError::new(
            ProviderErrorKind::MissingSearchCriteria,
            "a search request needs a hash, an imdb id or a query",
        ));
    }
    Ok(criteria)
}

/// Wire row to normalized candidate. Rows without a language are dropped
/// (language is a mandatory filter); unparseable numeric cells become absent
/// fields rather than errors.
fn normalize_row(row: OpenSubtitlesRow) -> Option<OpenSubtitlesSubtitle> {
    if row.sub_language_id.is_empty() {
        return None;
    }
    Some(OpenSubtitlesSubtitle {
        language: row.sub_language_id,
        hearing_impaired: row
            .sub_hearing_impaired
            .parse::<u8>()
            .map(|v| v != 0)
            .unwrap_or(false),
        page_link: row.subtitles_link,
        id: row.id_subtitle_file,
        matched_by: row.matched_by,
        movie_kind: row.movie_kind,
        hash: row.movie_hash.filter(|h| !h.is_empty()),
        movie_name: row.movie_name,
        movie_release_name: row.movie_release_name,
        movie_year: row.movie_year.and_then(|y| y.parse().ok()),
        movie_imdb_id: row.id_movie_imdb.and_then(|id| id.parse().ok()),
        series_season: row.series_season.and_then(|s| s.parse().ok()),
        series_episode: row.series_episode.and_then(|e| e.parse().ok()),
    })
}

/// Matched attributes of a candidate against a video.
///
/// The reported kind must agree with the video's kind, otherwise the result
/// is the empty set. Year is matched for movies only: for episodes the
/// catalog reports the airdate year, which rarely equals the series year.
pub fn compute_matches(video: &Video, subtitle: &OpenSubtitlesSubtitle) -> HashSet<MatchAttribute> {
    let mut matches = HashSet::new();
    match video {
        Video::Episode(episode) if subtitle.movie_kind == "episode" => {
            if let (Some(video_hash), Some(sub_hash)) =
                (video.hash_for(CATALOG_NAME), subtitle.hash.as_deref())
            {
                if video_hash == sub_hash {
                    matches.insert(MatchAttribute::Hash);
                }
            }
            if let (Some(video_imdb), Some(sub_imdb)) = (video.imdb_id(), subtitle.movie_imdb_id) {
                if video_imdb == sub_imdb {
                    matches.insert(MatchAttribute::ImdbId);
                }
            }
            if let Some(series) = subtitle.series_name() {
                if text::normalized_eq(&episode.series, series) {
                    matches.insert(MatchAttribute::Series);
                }
            }
            if let Some(season) = subtitle.series_season {
                if episode.season == season {
                    matches.insert(MatchAttribute::Season);
                }
            }
            if let Some(number) = subtitle.series_episode {
                if episode.episode == number {
                    matches.insert(MatchAttribute::Episode);
                }
            }
            if let (Some(video_title), Some(sub_title)) =
                (episode.title.as_deref(), subtitle.series_title())
            {
                if text::normalized_eq(video_title, sub_title) {
                    matches.insert(MatchAttribute::Title);
                }
            }
            guess_release_matches(&mut matches, &subtitle.movie_release_name, video);
        }
        Video::Movie(movie) if subtitle.movie_kind == "movie" => {
            if let (Some(video_hash), Some(sub_hash)) =
                (video.hash_for(CATALOG_NAME), subtitle.hash.as_deref())
            {
                if video_hash == sub_hash {
                    matches.insert(MatchAttribute::Hash);
                }
            }
            if let (Some(video_imdb), Some(sub_imdb)) = (video.imdb_id(), subtitle.movie_imdb_id) {
                if video_imdb == sub_imdb {
                    matches.insert(MatchAttribute::ImdbId);
                }
            }
            if text::normalized_eq(&movie.title, &subtitle.movie_name) {
                matches.insert(MatchAttribute::Title);
            }
            if let (Some(video_year), Some(sub_year)) = (movie.year, subtitle.movie_year) {
                if video_year == sub_year {
                    matches.insert(MatchAttribute::Year);
                }
            }
            guess_release_matches(&mut matches, &subtitle.movie_release_name, video);
        }
        _ => {
            info!(
                catalog = CATALOG_NAME,
                kind = %subtitle.movie_kind,
                "candidate kind disagrees with the video"
            );
        }
    }
    matches
}

fn guess_release_matches(
    matches: &mut HashSet<MatchAttribute>,
    release_name: &str,
    video: &Video,
) {
    for attr in [
        MatchAttribute::ReleaseGroup,
        MatchAttribute::Resolution,
        MatchAttribute::Format,
        MatchAttribute::VideoCodec,
        MatchAttribute::AudioCodec,
    ] {
        if release::guess_property(release_name, attr, video) {
            matches.insert(attr);
        }
    }
}
