use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use rentscope_config::Config;

/// Load a JSON profile, or fall back to env-driven defaults when the file
/// does not exist. A file that exists but does not parse is an error.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No config file, using environment defaults");
        return Ok(Config::new());
    }

    tracing::info!(path = %path.display(), "Loading config...");
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

/// Write the effective config as a starting profile
pub fn write_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote config profile");
    Ok(())
}
