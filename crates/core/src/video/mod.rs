//! Video descriptors: what the user has on disk, as far as matching cares.
//!
//! A `Video` is immutable for the lifetime of a matching operation. Fields
//! that a release name may or may not reveal are optional; a missing field
//! is simply never matched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Discriminator between the two video variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Episode,
    Movie,
}

/// A TV episode the user wants subtitles for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeVideo {
    pub series: String,
    pub season: u32,
    pub episode: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    /// Content hashes keyed by catalog name; each catalog has its own
    /// hashing scheme, so a hash only ever compares against the same key.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub hashes: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<u32>,
}

/// A movie the user wants subtitles for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieVideo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub hashes: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<u32>,
}

/// The media the user has, polymorphic over the two kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Video {
    Episode(EpisodeVideo),
    Movie(MovieVideo),
}

impl Video {
    pub fn kind(&self) -> MediaKind {
        match self {
            Video::Episode(_) => MediaKind::Episode,
            Video::Movie(_) => MediaKind::Movie,
        }
    }

    /// The content hash recorded for a specific catalog, if any.
    pub fn hash_for(&self, catalog: &str) -> Option<&str> {
        match self {
            Video::Episode(v) => v.hashes.get(catalog).map(String::as_str),
            Video::Movie(v) => v.hashes.get(catalog).map(String::as_str),
        }
    }

    pub fn size(&self) -> Option<u64> {
        match self {
            Video::Episode(v) => v.size,
            Video::Movie(v) => v.size,
        }
    }

    pub fn imdb_id(&self) -> Option<u32> {
        match self {
            Video::Episode(v) => v.imdb_id,
            Video::Movie(v) => v.imdb_id,
        }
    }

    pub fn release_group(&self) -> Option<&str> {
        match self {
            Video::Episode(v) => v.release_group.as_deref(),
            Video::Movie(v) => v.release_group.as_deref(),
        }
    }

    pub fn resolution(&self) -> Option<&str> {
        match self {
            Video::Episode(v) => v.resolution.as_deref(),
            Video::Movie(v) => v.resolution.as_deref(),
        }
    }

    pub fn format(&self) -> Option<&str> {
        match self {
            Video::Episode(v) => v.format.as_deref(),
            Video::Movie(v) => v.format.as_deref(),
        }
    }

    pub fn video_codec(&self) -> Option<&str> {
        match self {
            Video::Episode(v) => v.video_codec.as_deref(),
            Video::Movie(v) => v.video_codec.as_deref(),
        }
    }

    pub fn audio_codec(&self) -> Option<&str> {
        match self {
            Video::Episode(v) => v.audio_codec.as_deref(),
            Video::Movie(v) => v.audio_codec.as_deref(),
        }
    }
}
