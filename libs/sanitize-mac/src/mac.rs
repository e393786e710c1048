use regex::Regex;
use std::fmt;

use crate::{ConfigurationError, MAC_HEX_DIGITS};

const COLON_PATTERN: &str = r"^([0-9A-Fa-f]{1,2}):([0-9A-Fa-f]{1,2}):([0-9A-Fa-f]{1,2}):([0-9A-Fa-f]{1,2}):([0-9A-Fa-f]{1,2}):([0-9A-Fa-f]{1,2})$";
const HYPHEN_PATTERN: &str = r"^([0-9A-Fa-f]{1,2})-([0-9A-Fa-f]{1,2})-([0-9A-Fa-f]{1,2})-([0-9A-Fa-f]{1,2})-([0-9A-Fa-f]{1,2})-([0-9A-Fa-f]{1,2})$";
const CISCO_PATTERN: &str = r"^([0-9A-Fa-f]{1,4})\.([0-9A-Fa-f]{1,4})\.([0-9A-Fa-f]{1,4})$";
const BARE_PATTERN: &str = r"^[0-9A-Fa-f]{12}$";

/// Surface form a MAC address was recognized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacForm {
    /// `0:11:22:aa:bb:cc`
    Colon,
    /// `0-11-22-aa-bb-cc`
    Hyphen,
    /// `11.22aa.bbcc`
    Cisco,
    /// `001122aabbcc`
    Bare,
}

impl MacForm {
    /// Recognition order; the first matching form wins.
    pub const ALL: [MacForm; 4] = [MacForm::Colon, MacForm::Hyphen, MacForm::Cisco, MacForm::Bare];

    pub fn as_str(&self) -> &'static str {
        match self {
            MacForm::Colon => "colon",
            MacForm::Hyphen => "hyphen",
            MacForm::Cisco => "cisco",
            MacForm::Bare => "bare",
        }
    }

    /// Width every captured component is zero-padded to.
    fn component_width(&self) -> usize {
        match self {
            MacForm::Colon | MacForm::Hyphen => 2,
            MacForm::Cisco => 4,
            MacForm::Bare => MAC_HEX_DIGITS,
        }
    }
}

impl fmt::Display for MacForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated MAC address: exactly 12 hex digits, in the case they were
/// written in the source value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMac {
    digits: String,
    form: MacForm,
}

impl ParsedMac {
    /// Accepts already padded and concatenated digits, checking length and
    /// alphabet.
    pub fn from_digits(digits: &str, form: MacForm) -> Option<Self> {
        if digits.len() != MAC_HEX_DIGITS || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            digits: digits.to_string(),
            form,
        })
    }

    pub fn digits(&self) -> &str {
        self.digits.as_str()
    }

    pub fn form(&self) -> MacForm {
        self.form
    }

    pub fn octets(&self) -> [u8; 6] {
        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            // Digits were checked to be hex on construction.
            *octet = u8::from_str_radix(&self.digits[i * 2..i * 2 + 2], 16).unwrap_or_default();
        }
        octets
    }
}

/// Compiled patterns for the four accepted surface forms.
#[derive(Debug, Clone)]
pub struct MacRecognizer {
    patterns: Vec<(MacForm, Regex)>,
}

impl MacRecognizer {
    pub fn new() -> Result<Self, ConfigurationError> {
        let mut patterns = Vec::with_capacity(MacForm::ALL.len());
        for form in MacForm::ALL {
            let pattern = match form {
                MacForm::Colon => COLON_PATTERN,
                MacForm::Hyphen => HYPHEN_PATTERN,
                MacForm::Cisco => CISCO_PATTERN,
                MacForm::Bare => BARE_PATTERN,
            };
            patterns.push((form, Regex::new(pattern)?));
        }
        Ok(Self { patterns })
    }

    /// Recognizes `value` as a MAC address, padding each component to its
    /// form's width. Returns `None` for anything that is not MAC-shaped.
    pub fn recognize(&self, value: &str) -> Option<ParsedMac> {
        for (form, regex) in &self.patterns {
            let Some(captures) = regex.captures(value) else {
                continue;
            };

            let width = form.component_width();
            let mut digits = String::with_capacity(MAC_HEX_DIGITS);
            if captures.len() == 1 {
                digits.push_str(&captures[0]);
            } else {
                for component in captures.iter().skip(1).flatten() {
                    digits.push_str(&pad_component(component.as_str(), width));
                }
            }

            return ParsedMac::from_digits(&digits, *form);
        }
        None
    }
}

/// Left-pads with zeros and keeps the last `width` characters.
fn pad_component(component: &str, width: usize) -> String {
    let padded = format!("{component:0>width$}");
    padded[padded.len() - width..].to_string()
}
