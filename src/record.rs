// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Log records and their structured fields.

use std::fmt;

use jiff::Timestamp;

use crate::level::Severity;

/// The value of a structured field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string.
    Str(String),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(v) => f.write_str(v),
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<log::kv::Value<'_>> for Value {
    fn from(v: log::kv::Value<'_>) -> Self {
        if let Some(v) = v.to_i64() {
            Value::Int(v)
        } else if let Some(v) = v.to_u64() {
            Value::Uint(v)
        } else if let Some(v) = v.to_f64() {
            Value::Float(v)
        } else if let Some(v) = v.to_bool() {
            Value::Bool(v)
        } else {
            Value::Str(v.to_string())
        }
    }
}

/// A named structured field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The field name.
    pub key: String,
    /// The field value.
    pub value: Value,
}

impl Field {
    /// Create a new field.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A log record as handed to appenders.
///
/// A record is built once per logical event and shared by every appender of a logger, so a
/// tee'd event is identical on all of its sinks.
#[derive(Debug, Clone)]
pub struct Record {
    time: Option<Timestamp>,
    severity: Severity,
    message: String,
    fields: Vec<Field>,
}

impl Record {
    /// Create a record without timestamp and fields.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            time: None,
            severity,
            message: message.into(),
            fields: vec![],
        }
    }

    /// Set the observed time.
    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }

    /// Append a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields, keeping their order.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// The observed time, absent when the logger suppresses timestamps.
    pub fn time(&self) -> Option<Timestamp> {
        self.time
    }

    /// The severity.
    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}
