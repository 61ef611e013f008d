//! Candidate matching and scoring.
//!
//! A candidate's metadata is compared to a video attribute by attribute; the
//! resulting match set is summed into a score using weights derived from the
//! per-kind equation systems.

mod attributes;
pub mod score;
pub mod solver;

pub use attributes::{MatchAttribute, EPISODE_ATTRIBUTES, MOVIE_ATTRIBUTES};
pub use score::{compute_score, solve_weights, weight_map};
pub use solver::{Equation, SolveError};

use std::collections::HashSet;

use crate::providers::{addic7ed, opensubtitles, CandidateMetadata};
use crate::video::Video;

/// Matched attributes between a video and a candidate, dispatched over the
/// catalog the candidate came from.
///
/// Always a subset of the vocabulary for the video's media kind; a candidate
/// whose kind disagrees with the video yields the empty set.
pub fn compute_match_set(video: &Video, candidate: &CandidateMetadata) -> HashSet<MatchAttribute> {
    match candidate {
        CandidateMetadata::Addic7ed(subtitle) => addic7ed::compute_matches(video, subtitle),
        CandidateMetadata::OpenSubtitles(subtitle) => {
            opensubtitles::compute_matches(video, subtitle)
        }
    }
}
