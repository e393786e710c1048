use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::{ConfigurationError, TAGS_FIELD};

/// Location of a field inside an event.
///
/// A plain name such as `client_mac` (or `client.mac`) addresses a top-level
/// key verbatim. A bracketed reference such as `[client][mac]` walks nested
/// objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    raw: String,
    path: Vec<String>,
}

impl FieldRef {
    pub fn parse(reference: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidFieldReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };

        if reference.is_empty() {
            return Err(invalid("field name cannot be empty"));
        }

        if !reference.starts_with('[') {
            return Ok(Self {
                raw: reference.to_string(),
                path: vec![reference.to_string()],
            });
        }

        let mut path = Vec::new();
        let mut rest = reference;
        while !rest.is_empty() {
            let Some(inner) = rest.strip_prefix('[') else {
                return Err(invalid("expected '[' between path segments"));
            };
            let Some(end) = inner.find(']') else {
                return Err(invalid("unterminated '['"));
            };
            let segment = &inner[..end];
            if segment.is_empty() {
                return Err(invalid("path segment cannot be empty"));
            }
            if segment.contains('[') {
                return Err(invalid("nested '[' inside a path segment"));
            }
            path.push(segment.to_string());
            rest = &inner[end + 1..];
        }

        Ok(Self {
            raw: reference.to_string(),
            path,
        })
    }

    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    pub fn segments(&self) -> &[String] {
        &self.path
    }

    fn split_last(&self) -> (&[String], &str) {
        // `parse` never produces an empty path.
        match self.path.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[][..], self.raw.as_str()),
        }
    }
}

impl FromStr for FieldRef {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldRef::parse(s)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A structured log event: a JSON object owned by the hosting pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value; anything other than an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self { fields })
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn get(&self, field: &FieldRef) -> Option<&Value> {
        let (parents, last) = field.split_last();
        let mut map = &self.fields;
        for segment in parents {
            map = map.get(segment)?.as_object()?;
        }
        map.get(last)
    }

    /// Returns the field's value when it is a JSON string.
    pub fn get_str(&self, field: &FieldRef) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Writes `value`, creating intermediate objects and replacing any
    /// non-object value standing in the way.
    pub fn set(&mut self, field: &FieldRef, value: Value) {
        let (parents, last) = field.split_last();
        let mut map = &mut self.fields;
        for segment in parents {
            let entry = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(child) = entry else {
                return;
            };
            map = child;
        }
        map.insert(last.to_string(), value);
    }

    pub fn remove(&mut self, field: &FieldRef) -> Option<Value> {
        let (parents, last) = field.split_last();
        let mut map = &mut self.fields;
        for segment in parents {
            map = map.get_mut(segment)?.as_object_mut()?;
        }
        map.remove(last)
    }

    pub fn tags(&self) -> Vec<&str> {
        match self.fields.get(TAGS_FIELD) {
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(tag)) => vec![tag.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(&tag)
    }

    /// Appends `tag` unless already present. A scalar `tags` value is
    /// promoted to an array first.
    pub fn add_tag(&mut self, tag: &str) {
        if self.has_tag(tag) {
            return;
        }
        let entry = self
            .fields
            .entry(TAGS_FIELD.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            let previous = entry.take();
            *entry = Value::Array(if previous.is_null() {
                Vec::new()
            } else {
                vec![previous]
            });
        }
        if let Value::Array(tags) = entry {
            tags.push(Value::String(tag.to_string()));
        }
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let scalar_match = match self.fields.get_mut(TAGS_FIELD) {
            Some(Value::Array(tags)) => {
                let before = tags.len();
                tags.retain(|t| t.as_str() != Some(tag));
                return tags.len() != before;
            }
            Some(Value::String(existing)) => existing == tag,
            _ => false,
        };
        if scalar_match {
            self.fields.remove(TAGS_FIELD);
        }
        scalar_match
    }
}

impl From<Map<String, Value>> for Event {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}
