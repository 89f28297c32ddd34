//! Metric record model
//!
//! A [`MetricRecord`] is one timestamped observation: a measurement name,
//! an ordered tag set, an ordered non-empty field set and a nanosecond
//! timestamp. Records are only obtainable through [`MetricRecordBuilder`],
//! which rejects field-less records and non-finite floats so that every
//! record renders to a parseable line.

use crate::domain::errors::EncodeError;
use chrono::Utc;

/// Value carried by a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    measurement: String,
    tags: Vec<(String, String)>,
    fields: Vec<(String, FieldValue)>,
    timestamp_ns: i64,
}

impl MetricRecord {
    pub fn builder(measurement: impl Into<String>) -> MetricRecordBuilder {
        MetricRecordBuilder {
            measurement: measurement.into(),
            tags: Vec::new(),
            fields: Vec::new(),
            timestamp_ns: 0,
        }
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn timestamp_ns(&self) -> i64 {
        self.timestamp_ns
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

pub struct MetricRecordBuilder {
    measurement: String,
    tags: Vec<(String, String)>,
    fields: Vec<(String, FieldValue)>,
    timestamp_ns: i64,
}

impl MetricRecordBuilder {
    /// Adds a tag. A repeated key overwrites the earlier value in place.
    /// Tags with an empty key or value are dropped; line protocol has no
    /// representation for them.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        if key.is_empty() || value.is_empty() {
            self.tags.retain(|(k, _)| *k != key);
        } else {
            upsert(&mut self.tags, key, value);
        }
        self
    }

    /// Adds a field. A repeated key overwrites the earlier value in place.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        upsert(&mut self.fields, key.into(), value.into());
        self
    }

    pub fn timestamp_ns(mut self, timestamp_ns: i64) -> Self {
        self.timestamp_ns = timestamp_ns;
        self
    }

    pub fn build(self) -> Result<MetricRecord, EncodeError> {
        if self.fields.is_empty() {
            return Err(EncodeError::NoFields {
                measurement: self.measurement,
            });
        }

        if let Some((key, _)) = self
            .fields
            .iter()
            .find(|(_, v)| matches!(v, FieldValue::Float(f) if !f.is_finite()))
        {
            return Err(EncodeError::NonFiniteField {
                measurement: self.measurement.clone(),
                field: key.clone(),
            });
        }

        Ok(MetricRecord {
            measurement: self.measurement,
            tags: self.tags,
            fields: self.fields,
            timestamp_ns: self.timestamp_ns,
        })
    }
}

fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

/// Current wall-clock time in epoch nanoseconds.
pub fn now_ns() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}
