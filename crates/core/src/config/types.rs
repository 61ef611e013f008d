use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::providers::addic7ed::Addic7edConfig;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Languages to search subtitles for, in catalog-native codes.
    pub languages: Vec<String>,
    #[serde(default)]
    pub addic7ed: Addic7edConfig,
}

/// Reject configurations that would only fail later, at query time.
pub(super) fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.languages.is_empty() {
        return Err(ConfigError::Invalid(
            "at least one language is required".to_string(),
        ));
    }
    if config.languages.iter().any(|l| l.trim().is_empty()) {
        return Err(ConfigError::Invalid(
            "languages must not be blank".to_string(),
        ));
    }
    if config.addic7ed.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "addic7ed.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.addic7ed.show_expiration_secs == 0 {
        return Err(ConfigError::Invalid(
            "addic7ed.show_expiration_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
