//! Subtitle catalog providers.
//!
//! Each provider pairs a transport trait (implemented by an external client)
//! with the catalog-specific query resolution and match computation. The
//! transports report failures through [`ProviderError`], never raw transport
//! errors; an absent show or subtitle is an empty result, not an error.

pub mod addic7ed;
pub mod addic7ed_http;
pub mod opensubtitles;
mod types;

pub use types::*;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// The specific failure a catalog reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Credentials rejected.
    Unauthorized,
    /// Session token missing or expired.
    NoSession,
    /// Daily download quota exhausted.
    DownloadLimitReached,
    /// Catalog rejected the IMDb identifier.
    InvalidImdbId,
    /// Catalog does not know this user agent.
    UnknownUserAgent,
    /// Catalog has blocked this user agent.
    DisabledUserAgent,
    /// Catalog is temporarily unavailable.
    ServiceUnavailable,
    /// A search request carried no usable criterion. Caller bug.
    MissingSearchCriteria,
    /// Provider misconfigured (bad base URL, missing credentials, ...).
    Configuration,
    /// Transport-level failure (connection, timeout, malformed payload).
    Transport,
    /// Anything the catalog reported that has no dedicated kind.
    Unexpected,
}

impl ProviderErrorKind {
    /// Whether this kind is an authentication failure. Mirrors the second
    /// category membership the error taxonomy carries alongside the kind.
    fn is_auth_failure(self) -> bool {
        matches!(
            self,
            ProviderErrorKind::Unauthorized
                | ProviderErrorKind::NoSession
                | ProviderErrorKind::UnknownUserAgent
                | ProviderErrorKind::DisabledUserAgent
        )
    }
}

/// A catalog failure: the kind plus its authentication-category membership,
/// carried as data.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub auth_failure: bool,
    message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            auth_failure: kind.is_auth_failure(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Configuration, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unexpected, message)
    }
}

/// Transport for catalogs that index shows and are browsed per season
/// (Addic7ed-shaped).
#[async_trait]
pub trait ShowCatalog: Send + Sync {
    /// The full show listing: display name to show id.
    async fn list_shows(&self) -> Result<Vec<ShowSuggestion>, ProviderError>;

    /// Server-side show search; suggestions in catalog relevance order.
    async fn search_show(&self, name: &str) -> Result<Vec<ShowSuggestion>, ProviderError>;

    /// All subtitle rows for one season of a show.
    async fn browse_season(
        &self,
        show_id: u32,
        season: u32,
    ) -> Result<Vec<EpisodeRow>, ProviderError>;
}

/// Transport for catalogs searched directly with multiple criteria
/// (OpenSubtitles-shaped).
#[async_trait]
pub trait CriteriaCatalog: Send + Sync {
    /// Run every criterion and return the concatenated rows.
    async fn search(
        &self,
        criteria: &[SearchCriteria],
    ) -> Result<Vec<OpenSubtitlesRow>, ProviderError>;
}

/// Map an HTTP-style status code to the provider taxonomy. `Ok` only for 200.
pub fn checked_status(code: u16) -> Result<(), ProviderError> {
    let kind = match code {
        200 => return Ok(()),
        401 => ProviderErrorKind::Unauthorized,
        406 => ProviderErrorKind::NoSession,
        407 => ProviderErrorKind::DownloadLimitReached,
        413 => ProviderErrorKind::InvalidImdbId,
        414 => ProviderErrorKind::UnknownUserAgent,
        415 => ProviderErrorKind::DisabledUserAgent,
        503 => ProviderErrorKind::ServiceUnavailable,
        _ => ProviderErrorKind::Unexpected,
    };
    Err(ProviderError::new(
        kind,
        format!("catalog returned status {code}"),
    ))
}

/// Convenience: index a show listing by both its raw lowercase name and its
/// condensed form, the two keys the cascade probes.
pub(crate) fn index_show_listing(listing: &[ShowSuggestion]) -> HashMap<String, u32> {
    let mut ids = HashMap::with_capacity(listing.len() * 2);
    for show in listing {
        ids.insert(show.name.to_lowercase(), show.id);
        ids.insert(crate::text::condense_series(&show.name), show.id);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_membership() {
        for kind in [
            ProviderErrorKind::Unauthorized,
            ProviderErrorKind::NoSession,
            ProviderErrorKind::UnknownUserAgent,
            ProviderErrorKind::DisabledUserAgent,
        ] {
            assert!(ProviderError::new(kind, "x").auth_failure, "{kind:?}");
        }
        for kind in [
            ProviderErrorKind::DownloadLimitReached,
            ProviderErrorKind::InvalidImdbId,
            ProviderErrorKind::ServiceUnavailable,
            ProviderErrorKind::Transport,
        ] {
            assert!(!ProviderError::new(kind, "x").auth_failure, "{kind:?}");
        }
    }

    #[test]
    fn test_checked_status_mapping() {
        assert!(checked_status(200).is_ok());
        assert_eq!(
            checked_status(401).unwrap_err().kind,
            ProviderErrorKind::Unauthorized
        );
        assert_eq!(
            checked_status(406).unwrap_err().kind,
            ProviderErrorKind::NoSession
        );
        assert_eq!(
            checked_status(407).unwrap_err().kind,
            ProviderErrorKind::DownloadLimitReached
        );
        assert_eq!(
            checked_status(413).unwrap_err().kind,
            ProviderErrorKind::InvalidImdbId
        );
        assert_eq!(
            checked_status(414).unwrap_err().kind,
            ProviderErrorKind::UnknownUserAgent
        );
        assert_eq!(
            checked_status(415).unwrap_err().kind,
            ProviderErrorKind::DisabledUserAgent
        );
        assert_eq!(
            checked_status(503).unwrap_err().kind,
            ProviderErrorKind::ServiceUnavailable
        );
        assert_eq!(
            checked_status(500).unwrap_err().kind,
            ProviderErrorKind::Unexpected
        );
    }

    #[test]
    fn test_index_show_listing_inserts_both_forms() {
        let listing = vec![ShowSuggestion {
            name: "Marvel's Agents of S.H.I.E.L.D.".to_string(),
            id: 4010,
        }];
        let ids = index_show_listing(&listing);
        assert_eq!(ids.get("marvel's agents of s.h.i.e.l.d."), Some(&4010));
        assert_eq!(ids.get("marvels agents of shield"), Some(&4010));
    }
}
