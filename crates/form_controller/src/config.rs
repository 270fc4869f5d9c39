use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use shared::protocol::{EndpointPaths, WindowFeatures};

pub const SETTINGS_FILE: &str = "webpuff.toml";
pub const ENV_PREFIX: &str = "WEBPUFF";
/// Honoured by the puff model itself; used when no listing is configured.
pub const VOLCANO_LIST_ENV: &str = "PUFF_VOLCANO_LIST";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EruptionDateCheck {
    /// Exactly 16 characters, nothing more.
    #[default]
    Length,
    /// 16 characters that also parse as `YYYY MM DD HH:MM`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoints: EndpointPaths,
    pub run_params_form: String,
    pub help_window_name: String,
    pub help_window: WindowFeatures,
    pub volcano_list: Option<PathBuf>,
    pub default_area: f64,
    pub eruption_date_check: EruptionDateCheck,
    pub normalize_eruption_dates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: EndpointPaths::default(),
            run_params_form: "runParamsForm".into(),
            help_window_name: "helpWindow".into(),
            help_window: WindowFeatures::default(),
            volcano_list: None,
            default_area: 0.0,
            eruption_date_check: EruptionDateCheck::Length,
            normalize_eruption_dates: false,
        }
    }
}

/// Defaults, then `webpuff.toml` in the working directory, then
/// `WEBPUFF__*` variables, then `PUFF_VOLCANO_LIST`.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), None)
}

/// `env` replaces the process environment when given.
pub fn load_settings_from(
    path: &Path,
    env: Option<config::Map<String, String>>,
) -> anyhow::Result<Settings> {
    let legacy_volcano_list = match &env {
        Some(vars) => vars.get(VOLCANO_LIST_ENV).cloned(),
        None => std::env::var(VOLCANO_LIST_ENV).ok(),
    };

    let mut settings: Settings = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .with_context(|| format!("failed to read settings from '{}'", path.display()))?
        .try_deserialize()
        .context("invalid webpuff settings")?;

    if settings.volcano_list.is_none() {
        settings.volcano_list = legacy_volcano_list
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
