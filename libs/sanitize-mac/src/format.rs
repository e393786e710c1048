use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{mac::ParsedMac, ConfigurationError};

/// Delimiter placed between groups of the rewritten address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Separator {
    #[default]
    Colon,
    Hyphen,
    /// Cisco grouping, three groups of four digits
    Dot,
    None,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Colon => ":",
            Separator::Hyphen => "-",
            Separator::Dot => ".",
            Separator::None => "",
        }
    }

    /// Digits per output group: 4 for Cisco grouping, 2 (one octet) otherwise.
    pub fn group_width(&self) -> usize {
        match self {
            Separator::Dot => 4,
            _ => 2,
        }
    }
}

impl FromStr for Separator {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ":" => Ok(Separator::Colon),
            "-" => Ok(Separator::Hyphen),
            "." => Ok(Separator::Dot),
            "" => Ok(Separator::None),
            other => Err(ConfigurationError::InvalidSeparator {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Separator {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Separator> for String {
    fn from(value: Separator) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

/// Letter case applied to the rewritten address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CaseRule {
    Lower,
    Upper,
    /// Keep the digits exactly as they appeared in the source value
    #[default]
    Preserve,
}

impl CaseRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseRule::Lower => "lower",
            CaseRule::Upper => "upper",
            CaseRule::Preserve => "",
        }
    }

    pub fn apply(&self, value: String) -> String {
        match self {
            CaseRule::Lower => value.to_ascii_lowercase(),
            CaseRule::Upper => value.to_ascii_uppercase(),
            CaseRule::Preserve => value,
        }
    }
}

impl FromStr for CaseRule {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(CaseRule::Lower),
            "upper" => Ok(CaseRule::Upper),
            "" | "none" => Ok(CaseRule::Preserve),
            other => Err(ConfigurationError::InvalidFixcase {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for CaseRule {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CaseRule> for String {
    fn from(value: CaseRule) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CaseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseRule::Preserve => write!(f, "none"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Regroups the validated digits, joins them with `separator` and applies
/// `case_rule`.
pub fn canonicalize(parsed: &ParsedMac, separator: Separator, case_rule: CaseRule) -> String {
    let digits = parsed.digits();
    let groups: Vec<&str> = (0..digits.len())
        .step_by(separator.group_width())
        .map(|start| &digits[start..start + separator.group_width()])
        .collect();

    case_rule.apply(groups.join(separator.as_str()))
}
