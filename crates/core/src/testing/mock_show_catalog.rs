//! Mock implementation of the [`ShowCatalog`] trait.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::providers::{EpisodeRow, ProviderError, ShowCatalog, ShowSuggestion};

/// Controllable [`ShowCatalog`] for tests:
/// - configurable show listing, search suggestions and browse rows
/// - recorded search names and listing call count for assertions
/// - injectable one-shot error
#[derive(Default)]
pub struct MockShowCatalog {
    shows: Mutex<Vec<ShowSuggestion>>,
    suggestions: Mutex<HashMap<String, Vec<ShowSuggestion>>>,
    rows: Mutex<HashMap<(u32, u32), Vec<EpisodeRow>>>,
    searches: Mutex<Vec<String>>,
    listing_calls: Mutex<usize>,
    next_error: Mutex<Option<ProviderError>>,
}

impl MockShowCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the full show listing.
    pub fn set_shows(&self, shows: Vec<(&str, u32)>) {
        *self.shows.lock().unwrap() = shows
            .into_iter()
            .map(|(name, id)| ShowSuggestion {
                name: name.to_string(),
                id,
            })
            .collect();
    }

    /// Configure suggestions returned for one exact search name.
    pub fn set_suggestions(&self, name: &str, suggestions: Vec<(&str, u32)>) {
        self.suggestions.lock().unwrap().insert(
            name.to_string(),
            suggestions
                .into_iter()
                .map(|(name, id)| ShowSuggestion {
                    name: name.to_string(),
                    id,
                })
                .collect(),
        );
    }

    /// Configure browse rows for one (show, season).
    pub fn set_rows(&self, show_id: u32, season: u32, rows: Vec<EpisodeRow>) {
        self.rows.lock().unwrap().insert((show_id, season), rows);
    }

    /// Fail the next transport call with this error.
    pub fn fail_next(&self, error: ProviderError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Every name passed to `search_show`, in call order.
    pub async fn recorded_searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    /// How many times the full listing was fetched.
    pub async fn listing_calls(&self) -> usize {
        *self.listing_calls.lock().unwrap()
    }

    fn take_error(&self) -> Option<ProviderError> {
        self.next_error.lock().unwrap().take()
    }
}

#[async_trait]
impl ShowCatalog for MockShowCatalog {
    async fn list_shows(&self) -> Result<Vec<ShowSuggestion>, ProviderError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        *self.listing_calls.lock().unwrap() += 1;
        Ok(self.shows.lock().unwrap().clone())
    }

    async fn search_show(&self, name: &str) -> Result<Vec<ShowSuggestion>, ProviderError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        self.searches.lock().unwrap().push(name.to_string());
        Ok(self
            .suggestions
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    async fn browse_season(
        &self,
        show_id: u32,
        season: u32,
    ) -> Result<Vec<EpisodeRow>, ProviderError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&(show_id, season))
            .cloned()
            .unwrap_or_default())
    }
}
