use serde_json::Value;
use tracing::{debug, info, trace};

use crate::{
    format::canonicalize, CaseRule, ConfigurationError, Event, FieldRef, MacRecognizer,
    MatchDecorations, SanitizeMacConfig, Separator,
};

/// A per-event transformation stage of a log pipeline.
///
/// `apply` mutates the event in place and reports whether the stage fired,
/// which the host uses for conditional routing.
pub trait Filter: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, event: &mut Event) -> bool;
}

/// Rewrites MAC-shaped field values into one canonical format.
///
/// Immutable once built; a single instance can be shared across threads and
/// applied to any number of events.
#[derive(Debug, Clone)]
pub struct MacSanitizer {
    field_pairs: Vec<(FieldRef, FieldRef)>,
    separator: Separator,
    case_rule: CaseRule,
    decorations: MatchDecorations,
    recognizer: MacRecognizer,
}

impl MacSanitizer {
    pub const NAME: &'static str = "sanitize_mac";

    pub fn new(config: &SanitizeMacConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let sanitizer = Self {
            field_pairs: config.field_pairs()?,
            separator: config.separator()?,
            case_rule: config.case_rule()?,
            decorations: config.decorations()?,
            recognizer: MacRecognizer::new()?,
        };

        info!(
            pairs = sanitizer.field_pairs.len(),
            separator = %sanitizer.separator,
            fixcase = %sanitizer.case_rule,
            decorations = !sanitizer.decorations.is_empty(),
            "MAC sanitizer ready"
        );
        Ok(sanitizer)
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn case_rule(&self) -> CaseRule {
        self.case_rule
    }

    pub fn field_pairs(&self) -> &[(FieldRef, FieldRef)] {
        &self.field_pairs
    }

    /// Canonical form of `value`, or `None` when it is not a MAC address.
    pub fn sanitize(&self, value: &str) -> Option<String> {
        self.recognizer
            .recognize(value)
            .map(|parsed| canonicalize(&parsed, self.separator, self.case_rule))
    }

    /// Rewrites every configured field that holds a MAC address and returns
    /// whether at least one was written. Fields that are absent, not strings
    /// or not MAC-shaped are skipped.
    pub fn apply(&self, event: &mut Event) -> bool {
        let mut written = 0;

        for (input, output) in &self.field_pairs {
            let Some(value) = event.get(input) else {
                trace!(field = %input, "Field absent, skipping");
                continue;
            };
            let Some(raw) = value.as_str() else {
                trace!(field = %input, "Field is not a string, skipping");
                continue;
            };
            let Some(sanitized) = self.sanitize(raw) else {
                trace!(field = %input, "Value does not look like a MAC address, skipping");
                continue;
            };

            debug!(input = %input, output = %output, value = %sanitized, "Sanitized MAC address");
            event.set(output, Value::String(sanitized));
            written += 1;
        }

        if written == 0 {
            return false;
        }

        self.decorations.apply(event);
        true
    }
}

impl Filter for MacSanitizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, event: &mut Event) -> bool {
        MacSanitizer::apply(self, event)
    }
}
