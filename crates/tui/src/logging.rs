use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use crate::{config::AppConfig, error::Result};

/// Sends tracing output to the configured log file; stdout belongs to the
/// terminal UI.
pub fn init(config: &AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "engine={level},tally_tui={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
