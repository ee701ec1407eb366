use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cloudkit::entity::DecodedEntity;
use crate::cloudkit::kind::EntityKind;

/// Untyped scalar value carried by a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// String value.
    String(String),
    /// Signed 64-bit integer.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// Timestamp value.
    Date(DateTime<Utc>),
    /// Null value.
    Null,
}

/// Store-assigned record identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind-tagged, ordered field-name/value mapping, the store's native
/// exchange format. Built per operation and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: EntityKind,
    fields: Vec<(String, RecordValue)>,
}

impl Record {
    /// Create an empty record of the given kind.
    pub fn new(kind: EntityKind) -> Self {
        Record {
            kind,
            fields: Vec::new(),
        }
    }

    /// Build a record from a decoded entity by zipping the kind's field
    /// registry with the mapper values.
    ///
    /// Panics when the value count does not match the registry; that is a
    /// schema-binding bug, not a runtime condition.
    pub fn from_entity(entity: DecodedEntity) -> Record {
        let kind = entity.kind();
        let names = kind.fields();
        let values = entity.into_values();
        assert_eq!(
            names.len(),
            values.len(),
            "{kind} mapper values must align with its field registry"
        );

        Record {
            kind,
            fields: names
                .iter()
                .map(|name| name.to_string())
                .zip(values)
                .collect(),
        }
    }

    /// Append a field, preserving insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: RecordValue) {
        self.fields.push((name.into(), value));
    }

    /// Kind tag of this record.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Fields in order.
    pub fn fields(&self) -> &[(String, RecordValue)] {
        &self.fields
    }

    /// Value of the named field, if present.
    pub fn value(&self, name: &str) -> Option<&RecordValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// String field accessor.
    pub fn string(&self, name: &str) -> Option<String> {
        match self.value(name)? {
            RecordValue::String(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// UUID field accessor; UUIDs are stored as strings.
    pub fn uuid(&self, name: &str) -> Option<Uuid> {
        match self.value(name)? {
            RecordValue::String(value) => Uuid::parse_str(value).ok(),
            _ => None,
        }
    }

    /// Integer field accessor.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.value(name)? {
            RecordValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float field accessor; integer values widen.
    pub fn float(&self, name: &str) -> Option<f64> {
        match self.value(name)? {
            RecordValue::Float(value) => Some(*value),
            RecordValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Boolean field accessor.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.value(name)? {
            RecordValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Timestamp field accessor.
    pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.value(name)? {
            RecordValue::Date(value) => Some(*value),
            _ => None,
        }
    }
}
