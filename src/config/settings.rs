//! User settings for the expense tracker
//!
//! Manages display preferences and forecast defaults.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::reports::forecast::Granularity;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Granularity used by `forecast` when none is given
    #[serde(default)]
    pub default_granularity: Granularity,

    /// Number of future days projected in daily mode
    #[serde(default = "default_daily_horizon")]
    pub daily_horizon: usize,

    /// Number of future months projected in monthly mode
    #[serde(default = "default_monthly_horizon")]
    pub monthly_horizon: usize,

    /// Whether mutations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_daily_horizon() -> usize {
    30
}

fn default_monthly_horizon() -> usize {
    12
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_granularity: Granularity::default(),
            daily_horizon: default_daily_horizon(),
            monthly_horizon: default_monthly_horizon(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Forecast horizon configured for a granularity
    pub fn horizon_for(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Daily => self.daily_horizon,
            Granularity::Monthly => self.monthly_horizon,
        }
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        read_json(paths.settings_file()).map_err(|e| {
            ExpenseError::Config(format!("Failed to load settings file: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_granularity, Granularity::Monthly);
        assert_eq!(settings.horizon_for(Granularity::Daily), 30);
        assert_eq!(settings.horizon_for(Granularity::Monthly), 12);
        assert!(settings.audit_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_granularity = Granularity::Daily;
        settings.currency_symbol = "$".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_granularity, Granularity::Daily);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"daily_horizon": 7}"#).unwrap();
        assert_eq!(settings.daily_horizon, 7);
        assert_eq!(settings.monthly_horizon, 12);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}
