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

use std::backtrace::Backtrace;
use std::fmt;

use crate::layout::ConsoleLayout;
use crate::layout::Layout;
use crate::level::Severity;
use crate::logger::Logger;
use crate::options::Options;
use crate::options::OutputFormat;
use crate::options::TimeFormat;
use crate::record::Field;
use crate::record::Record;
use crate::record::Value;
use crate::stack::Frame;
use crate::stack::StackTrace;

/// An error that carries structured context.
///
/// It can be returned like any other error: its [`Display`](fmt::Display) form is the message
/// followed by the fields. When a logger is at hand, [`Error::to_logger`] recovers a logger
/// carrying the accumulated fields so the error can be replayed as a real log event.
///
/// # Examples
///
/// ```
/// let err = zlog::Error::new("Test Message")
///     .with_int("n", 3)
///     .with_str("file", "myfile.rs");
/// assert_eq!(err.to_string(), "Test Message file=myfile.rs n=3");
///
/// err.to_logger().warn().str("message", err.message()).msg("This was an error");
/// ```
#[derive(Debug)]
pub struct Error {
    message: String,
    logger: Logger,
    fields: Vec<Field>,
    augmented: usize,
    backtrace: Backtrace,
}

impl Error {
    /// Create a new error whose context starts from the global logger's context.
    ///
    /// A backtrace is captured if enabled by `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_logger(crate::global::logger(), message)
    }

    /// Create a new error whose context starts from `logger`'s context.
    pub fn with_logger(logger: Logger, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            logger,
            fields: vec![],
            augmented: 0,
            backtrace: Backtrace::capture(),
        }
    }

    /// Add another piece of context as the field `nested#<n>`, counting from 1.
    ///
    /// ```
    /// let err = zlog::Error::new("failed").augment("reading config").augment("starting up");
    /// assert_eq!(err.field("nested#1").unwrap().to_string(), "reading config");
    /// assert_eq!(err.field("nested#2").unwrap().to_string(), "starting up");
    /// ```
    pub fn augment(mut self, text: impl Into<String>) -> Self {
        self.augmented += 1;
        let key = format!("nested#{}", self.augmented);
        self.fields.push(Field::new(key, text.into()));
        self
    }

    /// Add a string field.
    pub fn with_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(key, value.into()));
        self
    }

    /// Add an integer field.
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.fields.push(Field::new(key, value));
        self
    }

    /// Record the message of the error that caused this one as the `nested` field.
    pub fn with_cause(mut self, cause: &dyn std::error::Error) -> Self {
        self.fields.push(Field::new("nested", cause.to_string()));
        self
    }

    /// Capture a backtrace regardless of the environment.
    pub fn with_stack(mut self) -> Self {
        self.backtrace = Backtrace::force_capture();
        self
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The fields added to this error, in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The value of the last field named `key`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.key == key)
            .map(|field| &field.value)
    }

    /// Render the message and all fields as one plain line.
    ///
    /// The line is formatted like a monochrome console line without timestamp and level.
    pub fn render(&self) -> String {
        let options = Options::default()
            .format(OutputFormat::Monochrome)
            .time_format(TimeFormat::None);
        let record = Record::new(Severity::NoLevel, self.message.as_str())
            .with_fields(self.logger.context().iter().cloned())
            .with_fields(self.fields.iter().cloned());
        match ConsoleLayout::new(&options).no_color().format(&record) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
            Err(_) => self.message.trim().to_string(),
        }
    }

    /// A logger carrying the accumulated context, writing to the logger this error started from.
    pub fn to_logger(&self) -> Logger {
        let mut context = self.logger.with();
        for field in &self.fields {
            context = context.field(field.clone());
        }
        context.logger()
    }

    /// Recover the logger and message if `err` is an [`Error`].
    ///
    /// ```
    /// let err: Box<dyn std::error::Error> = Box::new(zlog::Error::new("Test Message"));
    /// if let Some((logger, message)) = zlog::Error::as_logger(err.as_ref()) {
    ///     logger.error().msg(message);
    /// }
    /// ```
    pub fn as_logger<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<(Logger, &'a str)> {
        let err = err.downcast_ref::<Error>()?;
        Some((err.to_logger(), err.message()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for Error {}

impl StackTrace for Error {
    fn frames(&self) -> Option<Vec<Frame>> {
        StackTrace::frames(&self.backtrace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::append::Memory;

    fn memory_logger() -> (Logger, Memory) {
        let layout = ConsoleLayout::new(
            &Options::default()
                .format(OutputFormat::Monochrome)
                .time_format(TimeFormat::None),
        );
        let memory = Memory::new(layout);
        let logger = Logger::new(vec![Box::new(memory.clone())]).timestamp(false);
        (logger, memory)
    }

    #[test]
    fn test_augment_numbering() {
        let err = Error::with_logger(Logger::nop(), "failed")
            .augment("x")
            .augment("x")
            .augment("x");
        let keys = err.fields().iter().map(|f| f.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, ["nested#1", "nested#2", "nested#3"]);
        for key in keys {
            assert_eq!(err.field(key), Some(&Value::from("x")));
        }
    }

    #[test]
    fn test_render() {
        let (logger, _) = memory_logger();
        let logger = logger.with().str("service", "api").logger();
        let cause = std::io::Error::other("connection reset");
        let err = Error::with_logger(logger, "request failed")
            .with_int("attempt", 2)
            .with_cause(&cause);
        assert_eq!(
            err.render(),
            r#"request failed attempt=2 nested="connection reset" service=api"#
        );
        assert_eq!(err.to_string(), err.render());
    }

    #[test]
    fn test_replay_as_event() {
        let (logger, memory) = memory_logger();
        let err = Error::with_logger(logger, "Test Message")
            .with_int("n", 3)
            .with_str("file", "myfile.rs");

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        let (logger, message) = Error::as_logger(boxed.as_ref()).unwrap();
        logger.error().msg(message);
        logger
            .warn()
            .str("message", message)
            .msg("This was an error");

        assert_eq!(
            memory.lines(),
            [
                "ERR Test Message file=myfile.rs n=3",
                r#"WRN This was an error file=myfile.rs message="Test Message" n=3"#,
            ]
        );
    }

    #[test]
    fn test_as_logger_on_foreign_error() {
        let err = std::io::Error::other("nope");
        assert!(Error::as_logger(&err).is_none());
    }
}
