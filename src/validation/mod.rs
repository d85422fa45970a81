// Field validation pipeline
// Per-endpoint rule tables run by one uniform runner; failures are collected
// per field and the originating form is re-rendered with sanitized values

pub mod extract;
pub mod pipeline;
pub mod rules;
pub mod sanitize;

pub use extract::{FormSpec, Validated};
pub use pipeline::{Check, CheckContext, FieldRule, Outcome, StoreCheck};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

/// Ordered (field, message) failures for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrorSet {
    errors: Vec<FieldError>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; a repeated (field, message) pair is kept once
    pub fn push(&mut self, field: &str, msg: &str) {
        if self.contains(field, msg) {
            return;
        }
        self.errors.push(FieldError {
            field: field.to_string(),
            msg: msg.to_string(),
        });
    }

    pub fn contains(&self, field: &str, msg: &str) -> bool {
        self.errors.iter().any(|e| e.field == field && e.msg == msg)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.msg.as_str())
    }
}

/// Sanitized form values in declared field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    fields: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: String) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field.to_string(), value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a field, or "" when it was not submitted
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Lossless JSON object of string values, for typed deserialization
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Deserialize a number carried as a form string
pub fn parse_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim().parse::<T>().map_err(serde::de::Error::custom)
}
