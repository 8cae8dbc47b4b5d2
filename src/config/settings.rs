//! User settings for the household ledger
//!
//! Stored as `config.json` in the base directory. Every field has a
//! default, so a partial or missing file still loads.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::export::DEFAULT_LEDGER_NAME;
use crate::storage::{read_text, write_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Name used as the CSV export filename prefix
    #[serde(default = "default_ledger_name")]
    pub ledger_name: String,

    /// Whether mutations are recorded in the audit log; off unless opted in
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_ledger_name() -> String {
    DEFAULT_LEDGER_NAME.to_string()
}

fn default_audit_enabled() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_name: default_ledger_name(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written back; call [`Settings::save`] to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let text = read_text(paths.settings_file())
            .map_err(|e| LedgerError::Config(format!("Failed to load settings: {}", e)))?;

        match text {
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| LedgerError::Config(format!("Failed to load settings: {}", e))),
            None => Ok(Self::default()),
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to save settings: {}", e)))?;

        write_atomic(paths.settings_file(), &json)
            .map_err(|e| LedgerError::Config(format!("Failed to save settings: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.ledger_name, "가계부");
        assert!(!settings.audit_enabled);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            ledger_name: "household".into(),
            audit_enabled: true,
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"audit_enabled": true}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.ledger_name, "가계부");
        assert!(loaded.audit_enabled);

        std::fs::write(paths.settings_file(), r#"{"ledger_name": "household"}"#).unwrap();
        assert!(!Settings::load_or_create(&paths).unwrap().audit_enabled);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));
    }
}
