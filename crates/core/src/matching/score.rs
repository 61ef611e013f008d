//! Score weights and candidate scoring.
//!
//! The two equation systems below encode relative attribute importance
//! declaratively, e.g. "a hash match alone outscores any combination of
//! weaker signals". They are solved once per process and memoized; a system
//! that fails to solve is a configuration defect and aborts at first use.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::attributes::MatchAttribute;
use super::solver::{solve, Equation, SolveError};
use crate::video::MediaKind;

use MatchAttribute::*;

/// The episode equation system: 13 constraints over 13 symbols.
///
/// Solution: release_group=8, resolution=4, format=4, video_codec=1,
/// audio_codec=2, series=20, year=20, season=20, episode=20, title=40,
/// tvdb_id=40, hash=79, imdb_id=80.
pub fn episode_equations() -> Vec<Equation> {
    vec![
        Equation::sum(
            Hash,
            &[
                Resolution,
                Format,
                VideoCodec,
                AudioCodec,
                ReleaseGroup,
                Series,
                Year,
                Season,
            ],
        ),
        Equation::sum_plus(
            Series,
            &[Resolution, VideoCodec, AudioCodec, ReleaseGroup, Format],
            1.0,
        ),
        Equation::sum(Year, &[Series]),
        Equation::sum(TvdbId, &[Series, Year]),
        Equation::sum(Season, &[Series]),
        Equation::sum(ImdbId, &[Series, Season, Episode, Year]),
        Equation::constant(Format, 4.0),
        Equation::constant(Resolution, 4.0),
        Equation::constant(VideoCodec, 1.0),
        Equation::sum(Title, &[Season, Episode]),
        Equation::sum(Season, &[Episode]),
        Equation::constant(ReleaseGroup, 8.0),
        Equation::constant(AudioCodec, 2.0),
    ]
}

/// The movie equation system: 9 constraints over 9 symbols.
///
/// Solution: audio_codec=1, video_codec=2, resolution=2, format=3,
/// release_group=6, year=7, title=13, hash=34, imdb_id=34.
pub fn movie_equations() -> Vec<Equation> {
    vec![
        Equation::sum(
            Hash,
            &[
                Resolution,
                Format,
                VideoCodec,
                AudioCodec,
                Title,
                Year,
                ReleaseGroup,
            ],
        ),
        Equation::sum(ImdbId, &[Hash]),
        Equation::sum(Resolution, &[VideoCodec]),
        Equation::scaled(VideoCodec, 2.0, AudioCodec),
        Equation::sum(Format, &[VideoCodec, AudioCodec]),
        Equation::sum_plus(Title, &[Resolution, VideoCodec, AudioCodec, Year], 1.0),
        Equation::sum_plus(ReleaseGroup, &[Resolution, VideoCodec, AudioCodec], 1.0),
        Equation::sum_plus(Year, &[ReleaseGroup], 1.0),
        Equation::constant(AudioCodec, 1.0),
    ]
}

/// Solve the equation system for a media kind.
///
/// Exposed for tests and diagnostics; production code goes through the
/// memoized [`weight_map`].
pub fn solve_weights(kind: MediaKind) -> Result<HashMap<MatchAttribute, f64>, SolveError> {
    match kind {
        MediaKind::Episode => solve(&episode_equations()),
        MediaKind::Movie => solve(&movie_equations()),
    }
}

static EPISODE_WEIGHTS: Lazy<HashMap<MatchAttribute, f64>> = Lazy::new(|| {
    solve_weights(MediaKind::Episode).expect("episode score equations must have a unique solution")
});

static MOVIE_WEIGHTS: Lazy<HashMap<MatchAttribute, f64>> = Lazy::new(|| {
    solve_weights(MediaKind::Movie).expect("movie score equations must have a unique solution")
});

/// The memoized weight map for a media kind.
///
/// Total over the kind's attribute vocabulary.
pub fn weight_map(kind: MediaKind) -> &'static HashMap<MatchAttribute, f64> {
    match kind {
        MediaKind::Episode => &EPISODE_WEIGHTS,
        MediaKind::Movie => &MOVIE_WEIGHTS,
    }
}

/// Total score of a match set: the sum of the matched attributes' weights.
///
/// # Panics
///
/// Panics if the set contains an attribute with no weight for `kind`. That
/// can only happen when a matcher emits an attribute outside the kind's
/// vocabulary, which is a programming error, not a runtime condition.
pub fn compute_score(matches: &HashSet<MatchAttribute>, kind: MediaKind) -> f64 {
    let weights = weight_map(kind);
    matches
        .iter()
        .map(|attr| {
            weights.get(attr).copied().unwrap_or_else(|| {
                panic!("no {kind:?} weight defined for matched attribute {attr}")
            })
        })
        .sum()
}
