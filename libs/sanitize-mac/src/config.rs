use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error};

use crate::{
    CaseRule, ConfigurationError, FieldRef, MacSanitizer, MatchDecorations, Separator,
};

const ENV_MATCH: &str = "SANITIZE_MAC_MATCH";
const ENV_SEPARATOR: &str = "SANITIZE_MAC_SEPARATOR";
const ENV_FIXCASE: &str = "SANITIZE_MAC_FIXCASE";
const ENV_ADD_TAG: &str = "SANITIZE_MAC_ADD_TAG";
const ENV_REMOVE_TAG: &str = "SANITIZE_MAC_REMOVE_TAG";

/// Options of the `sanitize_mac` filter, as declared by the hosting pipeline.
///
/// Values are kept as written and checked by [`SanitizeMacConfig::validate`],
/// so a bad separator is reported with the filter's own message instead of a
/// generic decoding error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SanitizeMacConfig {
    /// Input field to output field. Missing means no fields; `null` is an
    /// error.
    #[serde(rename = "match", default = "default_match")]
    pub field_map: Option<BTreeMap<String, String>>,

    /// One of `":"`, `"-"`, `"."` or `""`
    #[serde(default = "default_separator")]
    pub separator: String,

    /// One of `"lower"`, `"upper"` or `""` (`"none"` is accepted as blank)
    #[serde(default)]
    pub fixcase: String,

    /// Fields set on a matched event
    #[serde(default)]
    pub add_field: BTreeMap<String, String>,

    /// Fields removed from a matched event
    #[serde(default)]
    pub remove_field: Vec<String>,

    /// Tags appended to a matched event
    #[serde(default)]
    pub add_tag: Vec<String>,

    /// Tags removed from a matched event
    #[serde(default)]
    pub remove_tag: Vec<String>,
}

fn default_match() -> Option<BTreeMap<String, String>> {
    Some(BTreeMap::new())
}

fn default_separator() -> String {
    Separator::Colon.as_str().to_string()
}

impl Default for SanitizeMacConfig {
    fn default() -> Self {
        Self {
            field_map: default_match(),
            separator: default_separator(),
            fixcase: String::new(),
            add_field: BTreeMap::new(),
            remove_field: Vec::new(),
            add_tag: Vec::new(),
            remove_tag: Vec::new(),
        }
    }
}

impl SanitizeMacConfig {
    pub fn new(field_map: BTreeMap<String, String>, separator: &str, fixcase: &str) -> Self {
        Self {
            field_map: Some(field_map),
            separator: separator.to_string(),
            fixcase: fixcase.to_string(),
            ..Default::default()
        }
    }

    /// Adds one input → output pair.
    pub fn with_field(mut self, input: &str, output: &str) -> Self {
        self.field_map
            .get_or_insert_with(BTreeMap::new)
            .insert(input.to_string(), output.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.add_tag.push(tag.to_string());
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source; `from_env` passes
    /// the process environment.
    ///
    /// `SANITIZE_MAC_MATCH` is either a JSON object or comma separated
    /// `input=>output` pairs (a lone `input` rewrites in place).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(pairs) = lookup(ENV_MATCH) {
            config.field_map = Some(parse_match_pairs(&pairs)?);
        }

        if let Some(separator) = lookup(ENV_SEPARATOR) {
            config.separator = separator;
        }

        if let Some(fixcase) = lookup(ENV_FIXCASE) {
            config.fixcase = fixcase;
        }

        if let Some(tags) = lookup(ENV_ADD_TAG) {
            config.add_tag = split_list(&tags);
        }

        if let Some(tags) = lookup(ENV_REMOVE_TAG) {
            config.remove_tag = split_list(&tags);
        }

        Ok(config)
    }

    pub fn separator(&self) -> Result<Separator, ConfigurationError> {
        self.separator.parse()
    }

    pub fn case_rule(&self) -> Result<CaseRule, ConfigurationError> {
        self.fixcase.parse()
    }

    pub fn field_pairs(&self) -> Result<Vec<(FieldRef, FieldRef)>, ConfigurationError> {
        let field_map = self
            .field_map
            .as_ref()
            .ok_or(ConfigurationError::MissingMatch)?;

        field_map
            .iter()
            .map(|(input, output)| Ok((FieldRef::parse(input)?, FieldRef::parse(output)?)))
            .collect()
    }

    pub fn decorations(&self) -> Result<MatchDecorations, ConfigurationError> {
        MatchDecorations::new(
            &self.add_field,
            &self.remove_field,
            &self.add_tag,
            &self.remove_tag,
        )
    }

    /// Checks every option once; errors are logged before being returned.
    pub fn validate(&self) -> Result<&Self, ConfigurationError> {
        let result = self
            .separator()
            .and_then(|_| self.case_rule())
            .and_then(|_| self.field_pairs())
            .and_then(|_| self.decorations());

        if let Err(e) = result {
            error!("Invalid sanitize_mac configuration: {}", e);
            return Err(e);
        }

        debug!(
            fields = self.field_map.as_ref().map_or(0, BTreeMap::len),
            separator = %self.separator.as_str(),
            fixcase = %self.fixcase,
            "sanitize_mac configuration validated"
        );
        Ok(self)
    }

    pub fn build(&self) -> Result<MacSanitizer, ConfigurationError> {
        MacSanitizer::new(self)
    }
}

fn parse_match_pairs(value: &str) -> Result<BTreeMap<String, String>, ConfigurationError> {
    let trimmed = value.trim();
    if trimmed.starts_with('{') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut field_map = BTreeMap::new();
    for pair in trimmed.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (input, output) = match pair.split_once("=>") {
            Some((input, output)) => (input.trim(), output.trim()),
            None => (pair, pair),
        };
        if input.is_empty() || output.is_empty() {
            return Err(ConfigurationError::InvalidFieldReference {
                reference: pair.to_string(),
                reason: format!("expected 'input=>output' in {ENV_MATCH}"),
            });
        }
        field_map.insert(input.to_string(), output.to_string());
    }
    Ok(field_map)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
