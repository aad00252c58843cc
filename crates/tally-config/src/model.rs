use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_domain::PeriodSelector;
use uuid::Uuid;

use crate::ConfigError;

/// Stores user-configurable shell preferences and the active profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u8,
    #[serde(default)]
    pub default_period: PeriodSelector,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Profile whose data the shell reads. Nil until first assigned.
    #[serde(default)]
    pub profile_id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for data snapshots. Defaults to `<base>/data`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            currency_precision: Self::default_currency_precision(),
            default_period: PeriodSelector::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            profile_id: Uuid::nil(),
            data_root: None,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`] and [`Config::get`].
    pub const KEYS: [&'static str; 6] = [
        "locale",
        "currency",
        "currency_precision",
        "default_period",
        "ui_color_enabled",
        "data_root",
    ];

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Assigns a fresh profile id when none is set. Returns whether it changed.
    pub fn ensure_profile(&mut self) -> bool {
        if self.profile_id.is_nil() {
            self.profile_id = Uuid::new_v4();
            true
        } else {
            false
        }
    }

    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "currency_precision" => self.currency_precision.to_string(),
            "default_period" => self.default_period.key().to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "data_root" => self
                .data_root
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            "profile_id" => self.profile_id.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        match key {
            "locale" => {
                if value.is_empty() {
                    return Err(invalid("locale cannot be empty"));
                }
                self.locale = value.to_string();
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(invalid("expected a three-letter ISO 4217 code"));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "currency_precision" => {
                let precision: u8 = value
                    .parse()
                    .map_err(|_| invalid("expected a number between 0 and 4"))?;
                if precision > 4 {
                    return Err(invalid("expected a number between 0 and 4"));
                }
                self.currency_precision = precision;
            }
            "default_period" => {
                self.default_period = value
                    .parse::<PeriodSelector>()
                    .map_err(|err| invalid(&err.to_string()))?;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid("expected on/off")),
                };
            }
            "data_root" => {
                self.data_root = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("unknown key; expected one of {}", Self::KEYS.join(", ")),
                })
            }
        }
        Ok(())
    }
}

/// Default base directory for config and data: `~/.tally`.
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tally")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"currency":"EUR"}"#).unwrap();
        assert_eq!(cfg.currency, "EUR");
        assert_eq!(cfg.locale, "en-US");
        assert_eq!(cfg.currency_precision, 2);
        assert_eq!(cfg.default_period, PeriodSelector::ThisMonth);
        assert!(cfg.profile_id.is_nil());
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = Config::default();
        cfg.set("currency", "eur").unwrap();
        assert_eq!(cfg.currency, "EUR");
        cfg.set("default_period", "last-week").unwrap();
        assert_eq!(cfg.default_period, PeriodSelector::LastWeek);
        assert!(cfg.set("currency_precision", "9").is_err());
        assert!(cfg.set("ui_color_enabled", "maybe").is_err());
        assert!(cfg.set("theme", "dark").is_err());
    }

    #[test]
    fn ensure_profile_assigns_once() {
        let mut cfg = Config::default();
        assert!(cfg.ensure_profile());
        let id = cfg.profile_id;
        assert!(!cfg.ensure_profile());
        assert_eq!(cfg.profile_id, id);
    }
}
