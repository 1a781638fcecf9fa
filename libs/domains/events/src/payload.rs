//! Unwrapping of raw event bodies into a single flat key/value view.
//!
//! Producers deliver one of two shapes: an envelope with a `payload`
//! sub-object (multi-hop bus delivery) or a flat object (direct delivery).
//! The shape is detected exactly once; handlers only ever see the flat view.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::coerce::{datetime_from_components, decimal_from_value, external_id_from_value};

static EMPTY: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// Body shape as delivered by the bus bridge.
#[derive(Debug, Clone, Copy)]
pub enum EventBody<'a> {
    /// Multi-hop delivery: fields nested under a `payload` envelope key.
    Envelope { payload: &'a Map<String, Value> },
    /// Direct delivery: the body itself is the flat object.
    Flat(&'a Map<String, Value>),
}

impl<'a> EventBody<'a> {
    /// Detect the body shape. Never fails: a non-object body yields an empty
    /// flat view.
    pub fn detect(body: &'a Value) -> Self {
        match body {
            Value::Object(map) => match map.get("payload") {
                Some(Value::Object(inner)) => EventBody::Envelope { payload: inner },
                _ => EventBody::Flat(map),
            },
            _ => EventBody::Flat(&EMPTY),
        }
    }

    /// The flat key/value view, regardless of shape.
    pub fn fields(&self) -> EventPayload<'a> {
        match self {
            EventBody::Envelope { payload } => EventPayload { fields: payload },
            EventBody::Flat(map) => EventPayload { fields: map },
        }
    }
}

/// Flat view over an event's fields with typed, multi-key accessors.
///
/// Producers disagree on field naming, so every accessor takes a list of
/// candidate keys and returns the first non-null hit.
#[derive(Debug, Clone, Copy)]
pub struct EventPayload<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> EventPayload<'a> {
    pub fn from_body(body: &'a Value) -> Self {
        EventBody::detect(body).fields()
    }

    /// View over an already-extracted object, e.g. an array element.
    pub fn from_fields(fields: &'a Map<String, Value>) -> Self {
        EventPayload { fields }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Numeric identifier, coerced from numbers or alphanumeric codes.
    pub fn id(&self, keys: &[&str]) -> Option<i64> {
        self.first(keys)
            .and_then(external_id_from_value)
            .map(i64::from)
    }

    /// Decimal amount; `None` when no candidate key is present at all.
    pub fn decimal(&self, keys: &[&str]) -> Option<f64> {
        self.first(keys).map(decimal_from_value)
    }

    /// Non-empty trimmed string.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        self.first(keys)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Boolean flag; string "true"/"false" is tolerated.
    pub fn flag(&self, keys: &[&str]) -> bool {
        match self.first(keys) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Nested object as another flat view.
    pub fn object(&self, key: &str) -> Option<EventPayload<'a>> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|fields| EventPayload { fields })
    }

    pub fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Timestamp encoded either as UTC component array or an RFC 3339 string.
    pub fn timestamp(&self, keys: &[&str]) -> Option<DateTime<Utc>> {
        let value = self.first(keys)?;
        datetime_from_components(value).or_else(|| {
            value
                .as_str()
                .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
