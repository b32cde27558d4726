use clap::Parser;
use engine::{Currency, DEFAULT_STORAGE_KEY, DEFAULT_STORAGE_PATH};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_path: String,
    pub storage_key: String,
    pub currency: String,
    pub log_level: String,
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::default().code().to_string(),
            log_level: "info".to_string(),
            log_file: "config/tally_tui.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "tally_tui", about = "Terminal expense tracker")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the storage file (JSON key-value store).
    #[arg(long)]
    storage: Option<String>,
    /// Override the key the ledger is stored under.
    #[arg(long)]
    key: Option<String>,
    /// Override the display currency (BRL, EUR, USD).
    #[arg(long)]
    currency: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TALLY"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(storage) = args.storage {
        settings.storage_path = storage;
    }
    if let Some(key) = args.key {
        settings.storage_key = key;
    }
    if let Some(currency) = args.currency {
        settings.currency = currency;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    // Reject an unknown currency before the terminal is taken over.
    settings.currency()?;

    Ok(settings)
}
