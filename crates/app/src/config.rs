//! Environment configuration.
//!
//! | variable | default |
//! |---|---|
//! | `MEDISHOP_LOG_FORMAT` | `json` |
//! | `MEDISHOP_SEED_SAMPLE_DATA` | `true` |
//! | `MEDISHOP_DEFAULT_PAYMENT_METHOD` | `Cash` |
//! | `MEDISHOP_LOW_QUANTITY_THRESHOLD` | `20` |

use thiserror::Error;

use medishop_catalog::LOW_QUANTITY_THRESHOLD;
use medishop_observability::LogFormat;
use medishop_sales::PaymentMethod;

pub const LOG_FORMAT_VAR: &str = "MEDISHOP_LOG_FORMAT";
pub const SEED_VAR: &str = "MEDISHOP_SEED_SAMPLE_DATA";
pub const PAYMENT_VAR: &str = "MEDISHOP_DEFAULT_PAYMENT_METHOD";
pub const LOW_QUANTITY_VAR: &str = "MEDISHOP_LOW_QUANTITY_THRESHOLD";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_format: LogFormat,
    pub seed_sample_data: bool,
    pub default_payment_method: PaymentMethod,
    /// Medicines with fewer units than this are flagged in the catalog view.
    pub low_quantity_threshold: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            seed_sample_data: true,
            default_payment_method: PaymentMethod::Cash,
            low_quantity_threshold: LOW_QUANTITY_THRESHOLD,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(v) => v.parse::<LogFormat>().map_err(|e| invalid(LOG_FORMAT_VAR, &v, e))?,
            None => defaults.log_format,
        };

        let seed_sample_data = match lookup(SEED_VAR) {
            Some(v) => parse_bool(&v).ok_or_else(|| invalid(SEED_VAR, &v, "expected true/false"))?,
            None => defaults.seed_sample_data,
        };

        let default_payment_method = match lookup(PAYMENT_VAR) {
            Some(v) => v.parse::<PaymentMethod>().map_err(|e| invalid(PAYMENT_VAR, &v, e))?,
            None => defaults.default_payment_method,
        };

        let low_quantity_threshold = match lookup(LOW_QUANTITY_VAR) {
            Some(v) => v.trim().parse::<u32>().map_err(|e| invalid(LOW_QUANTITY_VAR, &v, e))?,
            None => defaults.low_quantity_threshold,
        };

        Ok(Self {
            log_format,
            seed_sample_data,
            default_payment_method,
            low_quantity_threshold,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
