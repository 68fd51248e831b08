//! Fixtures
//!
//! Named denomination sets stored as YAML under `<base>/denominations/<name>.yml`:
//!
//! ```yaml
//! currency: USD
//! denominations: ["0.25", "0.10", "0.05", "0.01"]
//! ```

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::change::denominations::{DenominationError, Denominations};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid denomination format
    #[error("Invalid denomination format: {0}")]
    InvalidDenomination(String),

    /// Denomination was parsed but is not usable
    #[error(transparent)]
    Denomination(#[from] DenominationError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Denomination set has not been loaded
    #[error("Denomination set not loaded: {0}")]
    NotLoaded(String),
}

/// Raw YAML shape of a denomination set.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DenominationsFixture {
    currency: String,
    denominations: Vec<String>,
}

/// A denomination set and the currency it is meant for.
#[derive(Debug, Clone, PartialEq)]
pub struct DenominationSet {
    /// Currency the set is issued in
    pub currency: &'static Currency,

    /// The denominations themselves
    pub denominations: Denominations,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded sets by name
    sets: FxHashMap<String, DenominationSet>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            sets: FxHashMap::default(),
        }
    }

    /// Load a denomination set from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, names an unknown
    /// currency, or lists a denomination that is not a positive decimal.
    pub fn load_denominations(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("denominations")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let set = parse_set(&contents)?;

        self.sets.insert(name.to_string(), set);

        Ok(self)
    }

    /// Get a previously loaded denomination set
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NotLoaded`] if no set of that name was loaded.
    pub fn denominations(&self, name: &str) -> Result<&DenominationSet, FixtureError> {
        self.sets
            .get(name)
            .ok_or_else(|| FixtureError::NotLoaded(name.to_string()))
    }

    /// Load a single named set from the default fixture directory
    ///
    /// # Errors
    ///
    /// See [`Fixture::load_denominations`].
    pub fn from_set(name: &str) -> Result<DenominationSet, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_denominations(name)?;

        fixture.denominations(name).cloned()
    }
}

/// Parse a denomination set document.
fn parse_set(contents: &str) -> Result<DenominationSet, FixtureError> {
    let fixture: DenominationsFixture = serde_norway::from_str(contents)?;

    let currency = parse_currency(&fixture.currency)?;

    let values = fixture
        .denominations
        .iter()
        .map(|value| {
            value
                .trim()
                .parse::<Decimal>()
                .map_err(|_err| FixtureError::InvalidDenomination(value.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DenominationSet {
        currency,
        denominations: Denominations::from_decimals(values)?,
    })
}

/// Resolve a supported ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes other than GBP, USD, EUR and JPY.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(iso::GBP),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "JPY" => Ok(iso::JPY),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
