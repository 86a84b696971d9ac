//! Global libcal-hours configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{HoursError, HoursResult};
use crate::i18n::Catalog;
use crate::shortcode::MAX_WEEKS;

static DEFAULT_API_URL: &str = "https://api3.libcal.com/api_hours_grid.php";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

// One extra week so a window starting late in the week is fully covered
fn default_fetch_weeks() -> u32 {
    MAX_WEEKS + 1
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/libcal-hours/config.toml
///
/// Every key can be overridden with a `LIBCAL_HOURS_` environment
/// variable, e.g. `LIBCAL_HOURS_INSTITUTION_ID=1234`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HoursConfig {
    /// LibCal institution id (`iid`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Weeks requested from the API.
    #[serde(default = "default_fetch_weeks")]
    pub fetch_weeks: u32,

    #[serde(default)]
    pub ignore_cache: bool,

    /// IANA timezone used to decide what "today" is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Translations keyed by the English string, e.g. `closed = "geschlossen"`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl Default for HoursConfig {
    fn default() -> Self {
        HoursConfig {
            institution_id: None,
            api_url: default_api_url(),
            fetch_weeks: default_fetch_weeks(),
            ignore_cache: false,
            timezone: None,
            timeout_secs: default_timeout_secs(),
            labels: HashMap::new(),
        }
    }
}

impl HoursConfig {
    pub fn config_path() -> HoursResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HoursError::Config("Could not determine config directory".into()))?
            .join("libcal-hours");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, creating a commented-out file on first use.
    pub fn load() -> HoursResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> HoursResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("LIBCAL_HOURS").try_parsing(true))
            .build()
            .map_err(|e| HoursError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HoursError::Config(e.to_string()))
    }

    /// Timezone for "today". Falls back to the system zone, then UTC.
    pub fn timezone(&self) -> HoursResult<Tz> {
        match &self.timezone {
            Some(name) => name
                .parse()
                .map_err(|_| HoursError::Config(format!("Unknown timezone '{name}'"))),
            None => Ok(iana_time_zone::get_timezone()
                .ok()
                .and_then(|name| name.parse().ok())
                .unwrap_or(Tz::UTC)),
        }
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.labels.clone())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn require_institution_id(&self) -> HoursResult<&str> {
        self.institution_id.as_deref().ok_or_else(|| {
            HoursError::Config(
                "No institution_id configured. Set it in the config file or LIBCAL_HOURS_INSTITUTION_ID".into(),
            )
        })
    }

    /// Effective settings as TOML, after file and environment are merged.
    pub fn to_toml(&self) -> HoursResult<String> {
        toml::to_string_pretty(self).map_err(|e| HoursError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HoursResult<()> {
        let contents = format!(
            "\
# libcal-hours configuration

# Your LibCal institution id:
# institution_id = \"1234\"

# Hours grid endpoint:
# api_url = \"{DEFAULT_API_URL}\"

# Weeks requested from the API:
# fetch_weeks = {weeks}

# Ask the API to bypass caches:
# ignore_cache = false

# Timezone used to decide what \"today\" is (defaults to the system timezone):
# timezone = \"America/Los_Angeles\"

# Seconds to wait for the API:
# timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Translations for table text:
# [labels]
# \"Hours\" = \"Öffnungszeiten\"
# \"closed\" = \"geschlossen\"
",
            weeks = default_fetch_weeks(),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HoursError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HoursError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Localize, TextKey};

    #[test]
    fn test_default_config_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        HoursConfig::create_default_config(&path).unwrap();
        let config = HoursConfig::load_from(&path).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.fetch_weeks, 4);
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.ignore_cache);
        assert!(config.institution_id.is_none());
        assert!(config.labels.is_empty());
    }

    #[test]
    fn test_load_values_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
institution_id = "4321"
ignore_cache = true
timezone = "Europe/Berlin"

[labels]
"Hours" = "Öffnungszeiten"
"24 hours" = "24 Stunden"
"#,
        )
        .unwrap();

        let config = HoursConfig::load_from(&path).unwrap();
        assert_eq!(config.require_institution_id().unwrap(), "4321");
        assert!(config.ignore_cache);
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Berlin);

        let catalog = config.catalog();
        assert_eq!(catalog.text(TextKey::Hours), "Öffnungszeiten");
        assert_eq!(catalog.text(TextKey::TwentyFourHours), "24 Stunden");
        assert_eq!(catalog.text(TextKey::Closed), "closed");
    }

    #[test]
    fn test_unknown_timezone() {
        let config = HoursConfig {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..HoursConfig::default()
        };
        assert!(matches!(config.timezone(), Err(HoursError::Config(_))));
    }

    #[test]
    fn test_missing_institution_id() {
        let config = HoursConfig::default();
        assert!(matches!(config.require_institution_id(), Err(HoursError::Config(_))));
    }

    #[test]
    fn test_effective_toml_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = HoursConfig {
            institution_id: Some("77".to_string()),
            fetch_weeks: 2,
            ..HoursConfig::default()
        };

        let text = config.to_toml().unwrap();
        assert!(text.contains("institution_id = \"77\""));
        assert!(!text.contains("timezone"));

        std::fs::write(&path, text).unwrap();
        let loaded = HoursConfig::load_from(&path).unwrap();
        assert_eq!(loaded.institution_id.as_deref(), Some("77"));
        assert_eq!(loaded.fetch_weeks, 2);
    }
}
