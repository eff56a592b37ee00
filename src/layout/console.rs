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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::color;
use crate::layout::Layout;
use crate::layout::LevelLabel;
use crate::layout::TimestampFormat;
use crate::options::Options;
use crate::record::Field;
use crate::record::Record;
use crate::record::Value;

const ERROR_FIELD: &str = "error";

/// A layout that formats log records as human friendly console lines.
///
/// Output format:
///
/// ```text
/// 2024-08-11 22:44:57 INF Starting up port=8080
/// 2024-08-11 22:44:57 WRN Disk almost full error="no space left" path=/var
/// ```
///
/// The parts are the timestamp, the level label, the message and the fields. Empty parts are
/// skipped. Fields are sorted by name, except that the `error` field always comes first.
///
/// # Examples
///
/// ```
/// use zlog::OutputFormat;
/// use zlog::Options;
/// use zlog::layout::ConsoleLayout;
///
/// let layout = ConsoleLayout::new(&Options::default().format(OutputFormat::Unicode));
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleLayout {
    timestamp: TimestampFormat,
    label: LevelLabel,
    colorful: bool,
    colored: bool,
    timezone: TimeZone,
}

impl ConsoleLayout {
    /// Build a layout from options.
    ///
    /// Colors are enabled when the output format is colorful and the process
    /// [supports colors](crate::color::supports_color).
    pub fn new(options: &Options) -> Self {
        Self {
            timestamp: TimestampFormat::new(&options.time_format),
            label: LevelLabel::new(options.format),
            colorful: options.format.is_colorful(),
            colored: color::supports_color(),
            timezone: TimeZone::system(),
        }
    }

    /// Disable colored output regardless of the process color support.
    pub fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Enable or disable colored output.
    ///
    /// Only colorful output formats are affected, and escapes are only emitted while the process
    /// [supports colors](crate::color::set_supports_color).
    pub fn color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    fn paints_fields(&self) -> bool {
        self.colorful && self.colored
    }

    fn write_field_name(&self, text: &mut String, key: &str) {
        match (self.paints_fields(), key == ERROR_FIELD) {
            (true, true) => text.push_str(&color::colorize(color::RED, "error=")),
            (true, false) => text.push_str(&color::colorize(color::CYAN, format_args!("{key}="))),
            (false, _) => {
                text.push_str(key);
                text.push('=');
            }
        }
    }
}

impl Layout for ConsoleLayout {
    fn format(&self, record: &Record) -> anyhow::Result<Vec<u8>> {
        let mut parts = Vec::with_capacity(3);
        if let Some(ts) = record.time() {
            parts.push(self.timestamp.render(ts, &self.timezone));
        }
        parts.push(self.label.render(record.severity(), self.colored).into_owned());
        parts.push(record.message().to_string());

        let mut text = String::new();
        for part in parts.into_iter().filter(|part| !part.is_empty()) {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&part);
        }

        for field in sorted_fields(record.fields()) {
            if !text.is_empty() {
                text.push(' ');
            }
            self.write_field_name(&mut text, &field.key);
            write_field_value(&mut text, &field.value)?;
        }

        Ok(text.into_bytes())
    }
}

fn sorted_fields(fields: &[Field]) -> Vec<&Field> {
    let mut sorted = fields.iter().collect::<Vec<_>>();
    // stable, so repeated keys keep their insertion order
    sorted.sort_by(|a, b| {
        let a_is_error = a.key == ERROR_FIELD;
        let b_is_error = b.key == ERROR_FIELD;
        b_is_error.cmp(&a_is_error).then_with(|| a.key.cmp(&b.key))
    });
    sorted
}

fn write_field_value(text: &mut String, value: &Value) -> std::fmt::Result {
    match value {
        Value::Str(s) if needs_quote(s) => write!(text, "{s:?}"),
        value => write!(text, "{value}"),
    }
}

fn needs_quote(s: &str) -> bool {
    s.chars()
        .any(|c| c.is_control() || c.is_whitespace() || matches!(c, '"' | '\\' | '='))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::level::Severity;
    use crate::options::OutputFormat;
    use crate::options::TimeFormat;

    fn layout(format: OutputFormat) -> ConsoleLayout {
        ConsoleLayout::new(&Options::default().format(format)).timezone(TimeZone::UTC)
    }

    fn render(layout: &ConsoleLayout, record: &Record) -> String {
        String::from_utf8(layout.format(record).unwrap()).unwrap()
    }

    fn sample() -> Record {
        Record::new(Severity::Warn, "Disk almost full")
            .with_time("2024-08-11T14:44:57.172105Z".parse::<Timestamp>().unwrap())
            .with_field(Field::new("path", "/var"))
            .with_field(Field::new("error", "no space left"))
            .with_field(Field::new("free", 0i64))
    }

    #[test]
    fn test_monochrome_line() {
        let layout = layout(OutputFormat::Monochrome).color(true);
        assert_eq!(
            render(&layout, &sample()),
            r#"2024-08-11 14:44:57 WRN Disk almost full error="no space left" free=0 path=/var"#
        );
    }

    #[test]
    fn test_color_line() {
        color::set_supports_color(true);
        let layout = layout(OutputFormat::Color).color(true);
        assert_eq!(
            render(&layout, &sample()),
            concat!(
                "2024-08-11 14:44:57 \x1b[38;5;208mWRN\x1b[0m Disk almost full ",
                "\x1b[38;5;196merror=\x1b[0m\"no space left\" ",
                "\x1b[38;5;45mfree=\x1b[0m0 ",
                "\x1b[38;5;45mpath=\x1b[0m/var",
            )
        );
    }

    #[test]
    fn test_color_fallback_is_escape_free() {
        color::set_supports_color(true);
        let colored = render(&layout(OutputFormat::Color).color(true), &sample());
        let plain = render(&layout(OutputFormat::Color).no_color(), &sample());
        assert!(colored.contains('\x1b'));
        assert!(!plain.contains('\x1b'));
        assert_eq!(
            plain,
            render(&layout(OutputFormat::Monochrome).color(true), &sample())
        );
    }

    #[test]
    fn test_unicode_line() {
        let layout = layout(OutputFormat::Unicode).no_color();
        assert_eq!(
            render(&layout, &sample()),
            r#"2024-08-11 14:44:57 🔶 Disk almost full error="no space left" free=0 path=/var"#
        );
    }

    #[test]
    fn test_empty_parts_are_skipped() {
        let layout = ConsoleLayout::new(
            &Options::default()
                .format(OutputFormat::Monochrome)
                .time_format(TimeFormat::None),
        );
        let record = Record::new(Severity::NoLevel, "Test Message")
            .with_field(Field::new("n", 3i64))
            .with_field(Field::new("file", "myfile.rs"));
        assert_eq!(render(&layout, &record), "Test Message file=myfile.rs n=3");

        let record = Record::new(Severity::Info, "");
        assert_eq!(render(&layout, &record), "INF");
    }

    #[test]
    fn test_suppressed_timestamp_with_time() {
        let layout = ConsoleLayout::new(
            &Options::default()
                .format(OutputFormat::Monochrome)
                .time_format(TimeFormat::None),
        );
        assert_eq!(
            render(&layout, &sample()),
            r#"WRN Disk almost full error="no space left" free=0 path=/var"#
        );
    }
}
