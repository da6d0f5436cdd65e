use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

use crate::ConfigError;

/// Environment variable that overrides every other data root setting.
pub const DATA_ROOT_ENV: &str = "EXPENSE_TRACKER_HOME";

const DATA_DIR_NAME: &str = "expense-tracker";
const FALLBACK_DATA_DIR: &str = ".expense-tracker";

/// Upper bound for the month windows, matching what the reports accept.
pub const MAX_WINDOW_MONTHS: usize = 1200;

/// Stores user-configurable preferences. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Profile selected when the stored document names none.
    pub default_profile: String,
    /// Months shown by the monthly overview.
    pub history_months: usize,
    /// Trailing months fed into the next-month forecast.
    pub forecast_months: usize,
    pub page_size: usize,
    pub backup_retention: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the stored document and its backups.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_profile: "Me".into(),
            history_months: 12,
            forecast_months: 6,
            page_size: 50,
            backup_retention: 5,
            data_root: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 8] = [
        "locale",
        "currency",
        "default_profile",
        "history_months",
        "forecast_months",
        "page_size",
        "backup_retention",
        "data_root",
    ];

    /// Directory holding the stored document, honouring [`DATA_ROOT_ENV`].
    pub fn resolve_data_root(&self) -> PathBuf {
        let from_env = env::var_os(DATA_ROOT_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        self.resolve_data_root_with(from_env)
    }

    pub fn resolve_data_root_with(&self, override_root: Option<PathBuf>) -> PathBuf {
        if let Some(path) = override_root {
            return path;
        }
        if let Some(path) = &self.data_root {
            return path.clone();
        }
        dirs::data_dir()
            .map(|base| base.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }

    /// Current value of `key` rendered for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "default_profile" => self.default_profile.clone(),
            "history_months" => self.history_months.to_string(),
            "forecast_months" => self.forecast_months.to_string(),
            "page_size" => self.page_size.to_string(),
            "backup_retention" => self.backup_retention.to_string(),
            "data_root" => self
                .data_root
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Updates `key` from user input. `data_root` accepts `none` to clear it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "locale" | "currency" | "default_profile" if value.is_empty() => return Err(invalid()),
            "locale" if !is_locale_tag(value) => return Err(invalid()),
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_ascii_uppercase(),
            "default_profile" => self.default_profile = value.to_string(),
            "history_months" => self.history_months = parse_months(value).ok_or_else(invalid)?,
            "forecast_months" => self.forecast_months = parse_months(value).ok_or_else(invalid)?,
            "page_size" => self.page_size = parse_positive(value).ok_or_else(invalid)?,
            "backup_retention" => {
                self.backup_retention = parse_positive(value).ok_or_else(invalid)?
            }
            "data_root" => {
                self.data_root = match value {
                    "" | "none" => None,
                    path => Some(PathBuf::from(path)),
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|n| *n > 0)
}

fn parse_months(value: &str) -> Option<usize> {
    parse_positive(value).filter(|n| *n <= MAX_WINDOW_MONTHS)
}

/// Accepts BCP 47 shaped tags such as `en`, `de-DE` or `pt_BR`.
fn is_locale_tag(value: &str) -> bool {
    let mut parts = value.split(['-', '_']);
    let language_ok = parts.next().is_some_and(|language| {
        (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_alphabetic())
    });
    language_ok
        && parts.all(|part| {
            (2..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_theme_key_is_ignored_on_load() {
        let cfg: Config = serde_json::from_str(r#"{"theme":"neon","locale":"de-DE"}"#).unwrap();
        assert_eq!(cfg.locale, "de-DE");
    }

    #[test]
    fn override_root_wins_over_configured_root() {
        let cfg = Config {
            data_root: Some(PathBuf::from("/configured")),
            ..Config::default()
        };
        assert_eq!(
            cfg.resolve_data_root_with(Some(PathBuf::from("/env"))),
            PathBuf::from("/env")
        );
        assert_eq!(cfg.resolve_data_root_with(None), PathBuf::from("/configured"));
        assert!(Config::default()
            .resolve_data_root_with(None)
            .to_string_lossy()
            .ends_with("expense-tracker"));
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = Config::default();
        cfg.set("locale", "fr_FR").unwrap();
        cfg.set("currency", "eur").unwrap();
        cfg.set("page_size", "20").unwrap();
        assert_eq!((cfg.locale.as_str(), cfg.currency.as_str(), cfg.page_size), ("fr_FR", "EUR", 20));

        assert!(matches!(cfg.set("locale", "english!"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(cfg.set("theme", "dark"), Err(ConfigError::UnknownKey(_))));
        assert!(cfg.set("page_size", "0").is_err());
        assert!(cfg.set("locale", " ").is_err());
        assert!(matches!(cfg.set("colour", "x"), Err(ConfigError::UnknownKey(_))));

        cfg.set("data_root", "/tmp/tracker").unwrap();
        assert_eq!(cfg.get("data_root").unwrap(), "/tmp/tracker");
        cfg.set("data_root", "none").unwrap();
        assert_eq!(cfg.data_root, None);
    }

    #[test]
    fn month_windows_are_capped() {
        let mut cfg = Config::default();
        cfg.set("history_months", "1200").unwrap();
        assert_eq!(cfg.history_months, MAX_WINDOW_MONTHS);
        assert!(cfg.set("history_months", "1201").is_err());
        assert!(cfg.set("forecast_months", "4294967296").is_err());
        assert_eq!(cfg.forecast_months, 6);
    }

    #[test]
    fn every_key_is_readable() {
        let cfg = Config::default();
        for key in Config::KEYS {
            assert!(cfg.get(key).is_ok(), "{key}");
        }
    }
}
