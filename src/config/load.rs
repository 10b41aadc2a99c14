use std::{env, path::PathBuf};

use super::schema::{MAX_TIMEOUT_SECS, Settings};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then layers environment
/// variables (prefix `SHELVE__`) on top and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SHELVE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("library.extensions")
                .with_list_parse_key("library.ignore_dirs")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.metadata.timeout_secs) {
            return Err(format!(
                "metadata.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}"
            ));
        }
        if self.library.normalized_extensions().is_empty() {
            return Err("library.extensions must name at least one extension".to_string());
        }
        if self.metadata.command.trim().is_empty() {
            return Err("metadata.command must not be empty".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `SHELVE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SHELVE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/shelve/config.toml`
/// or `~/.config/shelve/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("shelve").join("config.toml"))
}

/// `~/Music`, used when neither the argument nor the config names a root.
pub fn default_music_root() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join("Music"))
}
