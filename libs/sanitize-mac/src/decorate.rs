use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::{ConfigurationError, Event, FieldRef};

/// Changes applied once to an event after the sanitizer rewrote at least one
/// of its fields.
///
/// Runs in a fixed order: `add_field`, `remove_field`, `add_tag`, `remove_tag`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchDecorations {
    add_field: Vec<(FieldRef, String)>,
    remove_field: Vec<FieldRef>,
    add_tag: Vec<String>,
    remove_tag: Vec<String>,
}

impl MatchDecorations {
    pub fn new(
        add_field: &BTreeMap<String, String>,
        remove_field: &[String],
        add_tag: &[String],
        remove_tag: &[String],
    ) -> Result<Self, ConfigurationError> {
        let add_field = add_field
            .iter()
            .map(|(field, value)| Ok((FieldRef::parse(field)?, value.clone())))
            .collect::<Result<Vec<_>, ConfigurationError>>()?;
        let remove_field = remove_field
            .iter()
            .map(|field| FieldRef::parse(field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            add_field,
            remove_field,
            add_tag: add_tag.to_vec(),
            remove_tag: remove_tag.to_vec(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.add_field.is_empty()
            && self.remove_field.is_empty()
            && self.add_tag.is_empty()
            && self.remove_tag.is_empty()
    }

    pub fn apply(&self, event: &mut Event) {
        for (field, value) in &self.add_field {
            event.set(field, Value::String(value.clone()));
            debug!(field = %field, "Added field on match");
        }
        for field in &self.remove_field {
            if event.remove(field).is_some() {
                debug!(field = %field, "Removed field on match");
            }
        }
        for tag in &self.add_tag {
            event.add_tag(tag);
        }
        for tag in &self.remove_tag {
            event.remove_tag(tag);
        }
    }
}
