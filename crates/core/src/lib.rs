//! Subtitle catalog search, matching and scoring.
//!
//! Given a [`video::Video`] the user has on disk, the crate resolves catalog
//! queries (including the cascading series-id fallback for catalogs that
//! need one), turns each returned candidate into a set of matched attributes
//! and sums equation-derived weights into a comparable score. Picking the
//! final subtitle from the scored candidates is the caller's job.

pub mod config;
pub mod matching;
pub mod providers;
pub mod release;
pub mod testing;
pub mod text;
pub mod video;

pub use config::{load_config, load_config_from_str, Config, ConfigError};
pub use matching::{compute_match_set, compute_score, MatchAttribute};
pub use providers::{
    addic7ed::Addic7edProvider, opensubtitles::OpenSubtitlesProvider, CandidateMetadata,
    CriteriaCatalog, ProviderError, ProviderErrorKind, SearchCriteria, ShowCatalog,
};
pub use video::{MediaKind, Video};
