//! Engine configuration management.

use serde::Deserialize;

use crate::error::AppError;

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Amount rendering settings.
    #[serde(default)]
    pub format: FormatSettings,
    /// Amount parsing defaults.
    #[serde(default)]
    pub parse: ParseSettings,
    /// Extra currencies registered at startup.
    #[serde(default)]
    pub currencies: Vec<CurrencyConfig>,
}

/// Amount rendering settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatSettings {
    /// Decimal separator.
    #[serde(default = "default_decimal_sep")]
    pub decimal_sep: char,
    /// Grouping (thousands) separator.
    #[serde(default = "default_grouping_sep")]
    pub grouping_sep: char,
    /// Prefix rendered amounts with their currency code.
    #[serde(default = "default_true")]
    pub show_currency: bool,
    /// Render zero amounts as an empty string.
    #[serde(default)]
    pub blank_if_zero: bool,
}

fn default_decimal_sep() -> char {
    '.'
}

fn default_grouping_sep() -> char {
    ','
}

fn default_true() -> bool {
    true
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            decimal_sep: default_decimal_sep(),
            grouping_sep: default_grouping_sep(),
            show_currency: true,
            blank_if_zero: false,
        }
    }
}

/// Amount parsing defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseSettings {
    /// Currency code used when the text carries none.
    #[serde(default)]
    pub default_currency: Option<String>,
    /// Place the decimal point automatically from the currency exponent.
    #[serde(default)]
    pub auto_decimal_place: bool,
    /// Fail when no currency resolves.
    #[serde(default)]
    pub strict_currency: bool,
}

/// A currency declared in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// ISO-like 3-letter code.
    pub code: String,
    /// Number of fractional digits.
    #[serde(default = "default_exponent")]
    pub exponent: u32,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Ordering rank, lower first.
    #[serde(default = "default_priority")]
    pub priority: u32,
    /// Display symbol, such as `€`.
    #[serde(default)]
    pub symbol: Option<String>,
}

fn default_exponent() -> u32 {
    2
}

fn default_priority() -> u32 {
    100
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is inconsistent.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CENTIME").separator("__"))
            .build()?;

        let engine: Self = config.try_deserialize()?;
        engine.validate()?;
        Ok(engine)
    }

    /// Checks cross-field rules that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when both separators are the same character
    /// or a separator is a digit.
    pub fn validate(&self) -> Result<(), AppError> {
        let FormatSettings {
            decimal_sep,
            grouping_sep,
            ..
        } = self.format;
        if decimal_sep == grouping_sep {
            return Err(AppError::Config(format!(
                "decimal and grouping separators must differ (both {decimal_sep:?})"
            )));
        }
        if decimal_sep.is_ascii_digit() || grouping_sep.is_ascii_digit() {
            return Err(AppError::Config("separators cannot be digits".to_string()));
        }
        Ok(())
    }
}
