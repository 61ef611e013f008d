//! Mock implementation of the [`CriteriaCatalog`] trait.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::providers::{CriteriaCatalog, OpenSubtitlesRow, ProviderError, SearchCriteria};

/// Controllable [`CriteriaCatalog`] for tests: configurable rows, recorded
/// criteria lists and an injectable one-shot error.
#[derive(Default)]
pub struct MockCriteriaCatalog {
    rows: Mutex<Vec<OpenSubtitlesRow>>,
    criteria: Mutex<Vec<Vec<SearchCriteria>>>,
    next_error: Mutex<Option<ProviderError>>,
}

impl MockCriteriaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the rows every search returns.
    pub fn set_rows(&self, rows: Vec<OpenSubtitlesRow>) {
        *self.rows.lock().unwrap() = rows;
    }

    /// Fail the next search with this error.
    pub fn fail_next(&self, error: ProviderError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Every criteria list passed to `search`, in call order.
    pub async fn recorded_criteria(&self) -> Vec<Vec<SearchCriteria>> {
        self.criteria.lock().unwrap().clone()
    }
}

#[async_trait]
impl CriteriaCatalog for MockCriteriaCatalog {
    async fn search(
        &self,
        criteria: &[SearchCriteria],
    ) -> Result<Vec<OpenSubtitlesRow>, ProviderError> {
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }
        self.criteria.lock().unwrap().push(criteria.to_vec());
        Ok(self.rows.lock().unwrap().clone())
    }
}
