//! MAC address sanitizer for structured log events.
//!
//! Log sources report MAC addresses in several shapes: colon-delimited
//! (`00:11:22:aa:bb:cc`), hyphen-delimited, Cisco dot-grouped
//! (`0011.22aa.bbcc`) or bare hex (`001122aabbcc`), with varying letter case
//! and with leading zeros dropped. This crate rewrites configured event fields
//! into one canonical format so they can be searched and joined reliably.
//!
//! A [`MacSanitizer`] is built once from a validated [`SanitizeMacConfig`] and
//! then applied to events one at a time. Values that do not look like a MAC
//! address are left untouched; only configuration problems are errors.

use thiserror::Error;

// Module declarations
pub mod config;
pub mod decorate;
pub mod event;
pub mod format;
pub mod mac;
pub mod sanitizer;

// Re-export key types
pub use config::SanitizeMacConfig;
pub use decorate::MatchDecorations;
pub use event::{Event, FieldRef};
pub use format::{CaseRule, Separator};
pub use mac::{MacForm, MacRecognizer, ParsedMac};
pub use sanitizer::{Filter, MacSanitizer};

/// Number of hex digits in a MAC address.
pub const MAC_HEX_DIGITS: usize = 12;

/// Event field holding the list of tags.
pub const TAGS_FIELD: &str = "tags";

/// Errors raised while configuring a sanitizer.
///
/// Per-field parse failures are never reported here; a value that is not
/// MAC-shaped is simply skipped.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Separator outside of `":"`, `"-"`, `"."` and `""`
    #[error("Invalid separator '{value}': must be one of ':', '-', '.' or blank")]
    InvalidSeparator { value: String },

    /// Case rule outside of `"lower"`, `"upper"` and blank
    #[error("Invalid fixcase '{value}': must be one of 'lower', 'upper' or blank")]
    InvalidFixcase { value: String },

    /// The `match` option was explicitly null
    #[error("The 'match' option must be defined")]
    MissingMatch,

    /// Field name that cannot be resolved to a location in an event
    #[error("Invalid field reference '{reference}': {reason}")]
    InvalidFieldReference { reference: String, reason: String },

    /// A recognition pattern failed to compile
    #[error("Invalid MAC pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// IO error while reading a configuration file
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Configuration document is not valid JSON for the expected options
    #[error("Invalid configuration document: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        ConfigurationError::Json(err.to_string())
    }
}

/// Canonicalizes a single value without building a full sanitizer.
///
/// Returns `None` when the value is not a recognizable MAC address.
///
/// # Example
/// ```
/// use sanitize_mac::{sanitize_value, CaseRule, Separator};
///
/// let out = sanitize_value("0:11:2:aa:b:cc", Separator::Colon, CaseRule::Lower).unwrap();
/// assert_eq!(out.as_deref(), Some("00:11:02:aa:0b:cc"));
/// ```
pub fn sanitize_value(
    value: &str,
    separator: Separator,
    case_rule: CaseRule,
) -> Result<Option<String>, ConfigurationError> {
    let recognizer = MacRecognizer::new()?;
    Ok(recognizer
        .recognize(value)
        .map(|parsed| format::canonicalize(&parsed, separator, case_rule)))
}
