//! Settings
//!
//! Engine defaults, loadable from YAML:
//!
//! ```yaml
//! remainder_order: last-to-first
//! max_table_units: 250000
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::allocation::remainder::RemainderOrder;

/// Settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error reading the settings file
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Engine settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Order in which leftover minimal units are handed to shares
    remainder_order: RemainderOrder,

    /// Largest change-making target, in minimal units, for table-based
    /// algorithms. Unlimited when absent.
    max_table_units: Option<usize>,
}

impl Settings {
    /// Parse settings from a YAML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Yaml`] if the document is not valid settings YAML.
    pub fn from_yaml(contents: &str) -> Result<Self, SettingsError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Order in which leftover minimal units are handed to shares.
    #[must_use]
    pub const fn remainder_order(&self) -> RemainderOrder {
        self.remainder_order
    }

    /// Largest change-making target, in minimal units, for table-based algorithms.
    #[must_use]
    pub const fn max_table_units(&self) -> Option<usize> {
        self.max_table_units
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> TestResult {
        let settings = Settings::from_yaml("{}")?;

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.remainder_order(), RemainderOrder::FirstToLast);
        assert_eq!(settings.max_table_units(), None);

        Ok(())
    }

    #[test]
    fn keys_override_defaults() -> TestResult {
        let settings = Settings::from_yaml("remainder_order: last-to-first\nmax_table_units: 10")?;

        assert_eq!(settings.remainder_order(), RemainderOrder::LastToFirst);
        assert_eq!(settings.max_table_units(), Some(10));

        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Settings::from_yaml("remainder: first-to-last"),
            Err(SettingsError::Yaml(_))
        ));
    }

    #[test]
    fn unknown_orders_are_rejected() {
        assert!(matches!(
            Settings::from_yaml("remainder_order: largest-first"),
            Err(SettingsError::Yaml(_))
        ));
    }

    #[test]
    fn settings_load_from_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        writeln!(file, "max_table_units: 500")?;

        let settings = Settings::load(file.path())?;

        assert_eq!(settings.max_table_units(), Some(500));
        assert_eq!(settings.remainder_order(), RemainderOrder::FirstToLast);

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Settings::load("./does-not-exist/settings.yml"),
            Err(SettingsError::Io(_))
        ));
    }
}
