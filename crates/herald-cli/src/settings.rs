//! Settings loading.
//!
//! [`Settings`] is loaded once at startup and passed down by value. The CLI
//! layer owns settings; the core only ever reads the ordered app list out
//! of it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables prefixed `HERALD_` (e.g. `HERALD_APPS=a,b`)
//! 2. Settings file (`--config` path, else `./herald.toml`, else the
//!    platform config dir)
//! 3. Built-in defaults (always present)
//!
//! `.env` files are loaded into the environment before this runs (see
//! `main.rs`), so they participate through layer 1.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use herald_core::domain::AppId;

use crate::error::{CliError, CliResult};

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Installed apps, in load order. Later apps win on command-name
    /// collisions, so overrides go at the end of the list.
    pub apps: Vec<String>,
    /// Output settings.
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub no_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            apps: vec!["scaffold".into()],
            output: OutputSettings { no_color: false },
        }
    }
}

impl Settings {
    /// Load settings: defaults ← file ← environment.
    ///
    /// An explicit `--config` path that does not exist is an error; the
    /// implicit locations are simply skipped when absent.
    pub fn load(explicit: Option<&PathBuf>) -> CliResult<Self> {
        let file = Self::resolve_file(explicit)?;

        let mut builder = config::Config::builder()
            .set_default("apps", vec!["scaffold".to_string()])
            .map_err(config_error)?
            .set_default("output.no_color", false)
            .map_err(config_error)?;

        if let Some(path) = &file {
            debug!(path = %path.display(), "loading settings file");
            builder = builder.add_source(config::File::from(path.clone()));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("HERALD")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("apps"),
        );

        let settings: Settings = builder
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)?;

        if settings.apps.is_empty() {
            return Err(CliError::Settings {
                message: "the configured app list is empty".into(),
                source: None,
            });
        }

        Ok(settings)
    }

    /// The ordered app identifiers the registry loads.
    pub fn app_ids(&self) -> Vec<AppId> {
        self.apps.iter().map(|s| AppId::new(s.clone())).collect()
    }

    /// Path to the default settings file in the platform config dir.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `herald.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "herald", "herald")
            .map(|d| d.config_dir().join("herald.toml"))
            .unwrap_or_else(|| PathBuf::from("herald.toml"))
    }

    fn resolve_file(explicit: Option<&PathBuf>) -> CliResult<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Settings {
                    message: format!("settings file not found: {}", path.display()),
                    source: None,
                });
            }
            return Ok(Some(path.clone()));
        }

        let local = Path::new("herald.toml");
        if local.exists() {
            return Ok(Some(local.to_path_buf()));
        }

        let global = Self::config_path();
        if global.exists() {
            return Ok(Some(global));
        }

        Ok(None)
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::Settings {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
