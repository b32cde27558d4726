//! Settings shared with the terminal UI. Both read `config/tally.toml` and
//! `TALLY_*` environment variables, so they work on the same storage file.
use config::{Config, ConfigError, Environment, File};
use engine::{Currency, DEFAULT_STORAGE_KEY, DEFAULT_STORAGE_PATH};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage_path: String,
    pub storage_key: String,
    pub currency: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::default().code().to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("TALLY"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_shared_defaults() {
        let settings = Settings::new("does/not/exist.toml").unwrap();

        assert_eq!(settings.storage_path, DEFAULT_STORAGE_PATH);
        assert_eq!(settings.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(
            Currency::try_from(settings.currency.as_str()).unwrap(),
            Currency::default()
        );
    }
}
