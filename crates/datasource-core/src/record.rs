use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::id::{ID_FIELD, validate_id};

/// A schema-flexible field/value mapping that always carries a valid identifier.
///
/// The identifier is stored as the first entry under [`ID_FIELD`]; the rest of
/// the fields are caller defined and keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Builds a record from an identifier and caller-supplied fields.
    ///
    /// Any identifier present in `info` is discarded in favour of `id`.
    pub fn new(id: impl Into<String>, info: Map<String, Value>) -> Result<Self> {
        let id = id.into();
        validate_id(&id)?;

        let mut fields = Map::with_capacity(info.len() + 1);
        fields.insert(ID_FIELD.to_string(), Value::String(id));
        fields.extend(info.into_iter().filter(|(key, _)| key != ID_FIELD));

        Ok(Self { fields })
    }

    pub fn id(&self) -> &str {
        // Construction guarantees a string identifier.
        self.fields
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Overwrites an existing non-identifier field.
    ///
    /// Returns `false` and leaves the record untouched when `key` is the
    /// identifier or is not already a field of this record.
    pub fn replace_field(&mut self, key: &str, value: Value) -> bool {
        if key == ID_FIELD {
            return false;
        }
        match self.fields.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = CoreError;

    fn try_from(fields: Map<String, Value>) -> Result<Self> {
        match fields.get(ID_FIELD) {
            Some(Value::String(id)) => {
                validate_id(id)?;
                let id = id.clone();
                Self::new(id, fields)
            }
            Some(other) => Err(CoreError::invalid_record(format!(
                "field '{ID_FIELD}' must be a string, got {other}"
            ))),
            None => Err(CoreError::invalid_record(format!(
                "missing required field '{ID_FIELD}'"
            ))),
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Self::try_from(fields),
            other => Err(CoreError::invalid_record(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}
