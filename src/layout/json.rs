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

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::layout::Layout;
use crate::options::TimeFormat;
use crate::record::Field;
use crate::record::Record;
use crate::record::Value;

/// The key of the level tag.
pub const LEVEL_KEY: &str = "_zl";
/// The key of the timestamp.
pub const TIMESTAMP_KEY: &str = "_zts";
/// The key of the message.
pub const MESSAGE_KEY: &str = "_zm";

/// A JSON layout for formatting log records, one object per line.
///
/// Output format:
///
/// ```json
/// {"_zl":"info","_zts":"2024-08-11T22:44:57+08:00","_zm":"ok"}
/// {"_zl":"debug","_zts":"2024-08-11T22:44:57+08:00","i":0,"msg":"msg #0","_zm":"debug message"}
/// ```
///
/// The level, timestamp and message use short keys so they don't collide with user fields.
/// Fields keep their insertion order.
#[derive(Debug, Clone)]
pub struct JsonLayout {
    time: JsonTime,
    timezone: TimeZone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum JsonTime {
    UnixSeconds,
    Rfc3339,
    Rfc3339Millis,
    Template(String),
}

impl Default for JsonLayout {
    fn default() -> Self {
        Self {
            time: JsonTime::Rfc3339,
            timezone: TimeZone::system(),
        }
    }
}

impl JsonLayout {
    /// Pick the timestamp encoding matching a console [`TimeFormat`].
    ///
    /// Relative timestamps become unix seconds, custom templates are applied as is and everything
    /// else is encoded as RFC 3339.
    pub fn new(time_format: &TimeFormat) -> Self {
        let time = match time_format {
            TimeFormat::Relative => JsonTime::UnixSeconds,
            TimeFormat::HighRes => JsonTime::Rfc3339Millis,
            TimeFormat::Custom(template) => JsonTime::Template(template.clone()),
            TimeFormat::None | TimeFormat::Default => JsonTime::Rfc3339,
        };
        Self {
            time,
            ..Default::default()
        }
    }

    /// Sets the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use zlog::layout::JsonLayout;
    ///
    /// let json_layout = JsonLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    fn encode_time(&self, ts: Timestamp) -> serde_json::Value {
        let zoned = ts.to_zoned(self.timezone.clone());
        let template = match &self.time {
            JsonTime::UnixSeconds => return ts.as_second().into(),
            JsonTime::Rfc3339 => "%Y-%m-%dT%H:%M:%S%:z",
            JsonTime::Rfc3339Millis => "%Y-%m-%dT%H:%M:%S.%3f%:z",
            JsonTime::Template(template) => template.as_str(),
        };
        jiff::fmt::strtime::format(template, &zoned)
            .unwrap_or_else(|_| template.to_string())
            .into()
    }
}

struct RecordLine<'a> {
    level: Option<&'a str>,
    time: Option<serde_json::Value>,
    fields: &'a [Field],
    message: &'a str,
}

impl Serialize for RecordLine<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(level) = self.level {
            map.serialize_entry(LEVEL_KEY, level)?;
        }
        if let Some(time) = &self.time {
            map.serialize_entry(TIMESTAMP_KEY, time)?;
        }
        for field in self.fields {
            map.serialize_entry(&field.key, &FieldValue(&field.value))?;
        }
        if !self.message.is_empty() {
            map.serialize_entry(MESSAGE_KEY, self.message)?;
        }
        map.end()
    }
}

struct FieldValue<'a>(&'a Value);

impl Serialize for FieldValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Value::Str(v) => serializer.serialize_str(v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
        }
    }
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record) -> anyhow::Result<Vec<u8>> {
        let record_line = RecordLine {
            level: record.severity().tag(),
            time: record.time().map(|ts| self.encode_time(ts)),
            fields: record.fields(),
            message: record.message(),
        };

        Ok(serde_json::to_vec(&record_line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;

    fn sample() -> Record {
        Record::new(Severity::Debug, "debug message")
            .with_time("2024-08-11T14:44:57.172105Z".parse::<Timestamp>().unwrap())
            .with_field(Field::new("msg", "msg #0"))
            .with_field(Field::new("i", 0i64))
    }

    fn render(layout: JsonLayout, record: &Record) -> String {
        let layout = layout.timezone(TimeZone::UTC);
        String::from_utf8(layout.format(record).unwrap()).unwrap()
    }

    #[test]
    fn test_json_line() {
        assert_eq!(
            render(JsonLayout::default(), &sample()),
            r#"{"_zl":"debug","_zts":"2024-08-11T14:44:57+00:00","msg":"msg #0","i":0,"_zm":"debug message"}"#
        );
    }

    #[test]
    fn test_json_time_encodings() {
        let relative = render(JsonLayout::new(&TimeFormat::Relative), &sample());
        assert!(relative.contains(r#""_zts":1723387497,"#), "{relative}");
        let highres = render(JsonLayout::new(&TimeFormat::HighRes), &sample());
        assert!(highres.contains(r#""_zts":"2024-08-11T14:44:57.172+00:00""#), "{highres}");
    }

    #[test]
    fn test_json_without_level_and_time() {
        let record = Record::new(Severity::NoLevel, "").with_field(Field::new("ok", true));
        assert_eq!(render(JsonLayout::default(), &record), r#"{"ok":true}"#);
    }
}
