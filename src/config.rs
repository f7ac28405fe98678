use std::{collections::BTreeMap, str::FromStr};

use serde::Deserialize;

use crate::{error::ConfigError, interpreter::evaluator::core::MissingPolicy};

fn default_true() -> bool {
    true
}

/// The conventional aliases for OHLCV input series.
#[must_use]
pub fn default_aliases() -> BTreeMap<String, String> {
    [("OPEN", "O"), ("HIGH", "H"), ("LOW", "L"), ("CLOSE", "C"), ("VOLUME", "V")]
        .into_iter()
        .map(|(source, alias)| (source.to_string(), alias.to_string()))
        .collect()
}

fn default_date_time_keys() -> Vec<String> {
    ["dateTime", "TS", "Ts", "date", "Date"].into_iter()
                                              .map(String::from)
                                              .collect()
}

/// Settings for a [`Session`](crate::session::Session).
///
/// Every field is optional in TOML; missing fields take their defaults.
///
/// ```toml
/// missing = "lenient"
/// prelude = true
/// date_time_keys = ["ts"]
///
/// [aliases]
/// CLOSE = "C"
/// ```
///
/// # Example
/// ```
/// use formulang::{config::SessionConfig, interpreter::evaluator::core::MissingPolicy};
///
/// let config = SessionConfig::from_toml_str("missing = \"lenient\"").unwrap();
/// assert_eq!(config.missing, MissingPolicy::Lenient);
/// assert!(config.prelude);
/// assert_eq!(config.aliases.get("CLOSE").map(String::as_str), Some("C"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Policy for unresolved names and uncallable callees.
    #[serde(default)]
    pub missing: MissingPolicy,
    /// Whether to install the prelude functions.
    #[serde(default = "default_true")]
    pub prelude: bool,
    /// Source variable name to alias, applied by
    /// [`Session::apply_aliases`](crate::session::Session::apply_aliases).
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
    /// Names tried, in order, when looking for the bar time series.
    #[serde(default = "default_date_time_keys")]
    pub date_time_keys: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { missing:        MissingPolicy::default(),
               prelude:        true,
               aliases:        default_aliases(),
               date_time_keys: default_date_time_keys(), }
    }
}

impl SessionConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed TOML, unknown keys or values of
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

impl FromStr for SessionConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}
