mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file, apply environment overrides, and
/// validate.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./marquee.toml",
        "~/.config/marquee/config.toml",
        "/etc/marquee/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Fill the provider keys from the environment when set. Prefixed variables
/// win over the bare names the original deployment used.
fn apply_env_overrides(config: &mut Config) {
    let lookup = |names: [&str; 2]| {
        names
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
    };

    if let Some(key) = lookup(["MARQUEE_TMDB_API_KEY", "TMDB_API_KEY"]) {
        config.tmdb.api_key = key;
    }
    if let Some(key) = lookup(["MARQUEE_OMDB_API_KEY", "OMDB_API_KEY"]) {
        config.omdb.api_key = key;
    }
}

/// Validate configuration. Missing API keys are deliberately not rejected
/// here; they surface as operation-scoped errors at call time.
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.catalog.max_attempts == 0 {
        anyhow::bail!("catalog.max_attempts must be at least 1");
    }

    if config.tmdb.api_key.is_empty() {
        tracing::warn!("TMDB API key is not configured; trending will be unavailable");
    }
    if config.omdb.api_key.is_empty() {
        tracing::warn!("OMDb API key is not configured; search and detail will be unavailable");
    }

    Ok(())
}
