use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::locale::DEFAULT_LOCALE;

const CONFIG_PATH_ENV_VAR: &str = "PERIODPICKER_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("periodpicker").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".periodpicker.toml"));
    }

    locations
}

/// Message translations, used for labels not covered by the locale table.
/// Unknown messages are passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Translator(HashMap<String, String>);

impl Translator {
    pub fn translate<'a>(&'a self, msg: &'a str) -> &'a str {
        self.0.get(msg).map_or(msg, String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translator {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Translator(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub placeholder: String,
    pub min_from: Option<String>,
    pub max_to: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub tick_rate_ms: u64,
    pub debounce_ms: u64,
    pub translations: Translator,
    /// Forwarded to the dropdown toggle.
    pub dropdown: toml::value::Table,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            locale: DEFAULT_LOCALE.to_owned(),
            placeholder: default_placeholder(),
            min_from: None,
            max_to: None,
            from: None,
            to: None,
            tick_rate_ms: default_tick_rate_ms(),
            debounce_ms: default_debounce_ms(),
            translations: Translator::default(),
            dropdown: toml::value::Table::new(),
        }
    }
}

fn default_placeholder() -> String {
    "Select period".to_owned()
}

const fn default_tick_rate_ms() -> u64 {
    40
}

const fn default_debounce_ms() -> u64 {
    120
}

impl Config {
    pub fn parse(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config = Config::parse(&content)
            .map_err(|e| Error::new(ErrorKind::ConfigParse, &format!("{}: {}", path.display(), e)))?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Loads the config from `path` if given, otherwise from the first existing
/// default location. Without any file the defaults are used.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::new(
                ErrorKind::ConfigNotFound,
                &format!("no config file at {}", path.display()),
            ));
        }
        return Config::load(path);
    }

    match find_configfile_locations().iter().find(|p| p.exists()) {
        Some(found) => Config::load(found),
        None => {
            log::info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.locale, "en");
        assert_eq!(config.tick_rate(), Duration::from_millis(40));
        assert_eq!(config.hover_delay(), Duration::from_millis(120));
        assert!(config.dropdown.is_empty());
    }

    #[test]
    fn full_config() {
        let config = Config::parse(
            r#"
            locale = "de"
            placeholder = "Zeitraum"
            min_from = "2020-01-01"
            from = "2024-02-01"
            to = "2024-02-01"
            debounce_ms = 200

            [translations]
            Apply = "Anwenden"

            [dropdown]
            pull_right = true
            "#,
        )
        .unwrap();

        assert_eq!(config.locale, "de");
        assert_eq!(config.min_from.as_deref(), Some("2020-01-01"));
        assert_eq!(config.max_to, None);
        assert_eq!(config.hover_delay(), Duration::from_millis(200));
        assert_eq!(config.translations.translate("Apply"), "Anwenden");
        assert_eq!(config.translations.translate("Close"), "Close");
        assert_eq!(
            config.dropdown.get("pull_right"),
            Some(&toml::Value::Boolean(true))
        );
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let err = Config::parse("tick_rate_ms = \"fast\"").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn missing_explicit_file() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/periodpicker.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigNotFound));
    }
}
