use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::types::{validate_config, Config};
use super::ConfigError;

/// Load configuration from file with environment variable overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("SUBSCOUT_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string (useful for testing).
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
languages = ["eng", "fra"]

[addic7ed]
show_expiration_secs = 3600
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.languages, vec!["eng", "fra"]);
        assert_eq!(config.addic7ed.show_expiration_secs, 3600);
        assert_eq!(config.addic7ed.timeout_secs, 10);
    }

    #[test]
    fn test_load_config_from_str_missing_languages() {
        let result = load_config_from_str("[addic7ed]\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_rejects_empty_languages() {
        let result = load_config_from_str("languages = []\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_config_rejects_zero_expiration() {
        let toml = r#"
languages = ["eng"]

[addic7ed]
show_expiration_secs = 0
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
languages = ["eng"]

[addic7ed]
base_url = "http://localhost:8000"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.addic7ed.base_url, "http://localhost:8000");
    }
}
