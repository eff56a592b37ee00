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

//! Loggers, their structured context and events.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;

use crate::append::Append;
use crate::append::Stderr;
use crate::layout::ConsoleLayout;
use crate::level::LevelThreshold;
use crate::level::Severity;
use crate::options::DEFAULT_STACK_DROP;
use crate::options::Options;
use crate::options::TimeFormat;
use crate::record::Field;
use crate::record::Record;
use crate::stack::StackSummarizer;
use crate::stack::StackTrace;

mod log_impl;

/// Create a console logger writing to stderr.
///
/// The logger renders records with a [`ConsoleLayout`] built from `options`, adds timestamps
/// unless [`TimeFormat::None`] is selected and drops records below the threshold derived from
/// [`Options::level`].
///
/// The options are remembered as the current console configuration used by [`tee`].
///
/// # Examples
///
/// ```
/// use zlog::Options;
///
/// let logger = zlog::new_logger(&Options::default().level(1));
/// logger.debug().int("port", 8080).msg("listening");
/// ```
///
/// [`tee`]: crate::tee
pub fn new_logger(options: &Options) -> Logger {
    crate::global::remember_console_options(options);
    console_logger(options)
}

pub(crate) fn console_logger(options: &Options) -> Logger {
    console_logger_to(options, Stderr::new(ConsoleLayout::new(options)))
}

fn console_logger_to(options: &Options, append: impl Append) -> Logger {
    Logger::new(vec![Box::new(append)])
        .timestamp(options.time_format != TimeFormat::None)
        .stack_drop(options.stack_drop)
        .level(LevelThreshold::from_verbosity(options.level))
}

/// A handle to a set of appenders plus the structured context attached to every record.
///
/// Loggers are cheap to clone; clones share their appenders. Every record emitted by a logger is
/// handed to all of its appenders, each formatting it with its own layout.
#[derive(Debug, Clone)]
pub struct Logger {
    appends: Arc<[Box<dyn Append>]>,
    threshold: LevelThreshold,
    timestamp: bool,
    context: Arc<Vec<Field>>,
    stack_drop: usize,
}

impl Logger {
    /// Create a logger fanning records out to `appends`.
    ///
    /// The logger starts with the [`Trace`](LevelThreshold::Trace) threshold, timestamps enabled
    /// and an empty context.
    pub fn new(appends: Vec<Box<dyn Append>>) -> Self {
        Self {
            appends: Arc::from(appends),
            threshold: LevelThreshold::Trace,
            timestamp: true,
            context: Arc::default(),
            stack_drop: DEFAULT_STACK_DROP,
        }
    }

    /// A logger that never writes anything.
    pub fn nop() -> Self {
        Self::new(vec![])
    }

    /// Return a copy of this logger with another threshold.
    pub fn level(mut self, threshold: LevelThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Return a copy of this logger with the threshold derived from a verbosity.
    pub fn verbosity(self, verbosity: i32) -> Self {
        self.level(LevelThreshold::from_verbosity(verbosity))
    }

    /// Return a copy of this logger that does or doesn't stamp records with the current time.
    pub fn timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Return a copy of this logger whose stack summaries drop `stack_drop` trailing frames.
    pub fn stack_drop(mut self, stack_drop: usize) -> Self {
        self.stack_drop = stack_drop;
        self
    }

    /// The current threshold.
    pub fn threshold(&self) -> LevelThreshold {
        self.threshold
    }

    /// The fields attached to every record.
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Start building a child logger with more context fields.
    ///
    /// ```
    /// let logger = zlog::Logger::nop().with().str("component", "db").logger();
    /// assert_eq!(logger.context().len(), 1);
    /// ```
    pub fn with(&self) -> Context {
        Context {
            fields: self.context.as_ref().clone(),
            logger: self.clone(),
        }
    }

    /// Whether a record of `severity` would be written.
    pub fn enabled(&self, severity: &Severity) -> bool {
        !self.appends.is_empty() && self.threshold.allows(severity)
    }

    /// Start an event of the given severity.
    pub fn event(&self, severity: Severity) -> Event {
        let logger = self.enabled(&severity).then(|| self.clone());
        Event {
            logger,
            severity,
            fields: vec![],
        }
    }

    /// Start a trace event.
    pub fn trace(&self) -> Event {
        self.event(Severity::Trace)
    }

    /// Start a debug event.
    pub fn debug(&self) -> Event {
        self.event(Severity::Debug)
    }

    /// Start an info event.
    pub fn info(&self) -> Event {
        self.event(Severity::Info)
    }

    /// Start a warn event.
    pub fn warn(&self) -> Event {
        self.event(Severity::Warn)
    }

    /// Start an error event.
    pub fn error(&self) -> Event {
        self.event(Severity::Error)
    }

    /// Start a fatal event. Sending it terminates the process with exit status 1.
    pub fn fatal(&self) -> Event {
        self.event(Severity::Fatal)
    }

    /// Start a panic event. Sending it panics with the message.
    pub fn panic(&self) -> Event {
        self.event(Severity::Panic)
    }

    /// Start an event without level. It passes every threshold.
    pub fn log(&self) -> Event {
        self.event(Severity::NoLevel)
    }

    /// Flushes all appenders.
    pub fn flush(&self) {
        for append in self.appends.iter() {
            append.flush();
        }
    }

    fn write(&self, severity: Severity, message: String, fields: Vec<Field>) {
        let mut record = Record::new(severity, message)
            .with_fields(self.context.iter().cloned())
            .with_fields(fields);
        if self.timestamp {
            record = record.with_time(Timestamp::now());
        }

        for append in self.appends.iter() {
            if let Err(err) = append.append(&record) {
                log_impl::handle_error(&record, err);
            }
        }
    }
}

macro_rules! field_setters {
    () => {
        /// Add a string field.
        pub fn str(self, key: impl Into<String>, value: impl Into<String>) -> Self {
            self.field(Field::new(key, value.into()))
        }

        /// Add a signed integer field.
        pub fn int(self, key: impl Into<String>, value: i64) -> Self {
            self.field(Field::new(key, value))
        }

        /// Add an unsigned integer field.
        pub fn uint(self, key: impl Into<String>, value: u64) -> Self {
            self.field(Field::new(key, value))
        }

        /// Add a floating point field.
        pub fn float(self, key: impl Into<String>, value: f64) -> Self {
            self.field(Field::new(key, value))
        }

        /// Add a boolean field.
        pub fn bool(self, key: impl Into<String>, value: bool) -> Self {
            self.field(Field::new(key, value))
        }

        /// Add the message of `err` as the `error` field.
        pub fn err(self, err: &dyn std::error::Error) -> Self {
            self.field(Field::new("error", err.to_string()))
        }
    };
}

/// A builder for a child logger, see [`Logger::with`].
#[derive(Debug)]
#[must_use = "call `logger` to build the child logger"]
pub struct Context {
    logger: Logger,
    fields: Vec<Field>,
}

impl Context {
    field_setters!();

    /// Add an arbitrary field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the child logger.
    pub fn logger(self) -> Logger {
        Logger {
            context: Arc::new(self.fields),
            ..self.logger
        }
    }
}

/// A log event under construction.
///
/// Events of disabled severities are inert: adding fields and sending them does nothing, except
/// that fatal and panic events still end the process or thread.
#[derive(Debug)]
#[must_use = "call `msg` or `send` to emit the event"]
pub struct Event {
    logger: Option<Logger>,
    severity: Severity,
    fields: Vec<Field>,
}

impl Event {
    /// An event that is never written.
    pub fn disabled() -> Self {
        Event {
            logger: None,
            severity: Severity::NoLevel,
            fields: vec![],
        }
    }

    field_setters!();

    /// Add an arbitrary field.
    pub fn field(mut self, field: Field) -> Self {
        if self.logger.is_some() {
            self.fields.push(field);
        }
        self
    }

    /// Add a condensed stack trace of `trace` as the `stack` field.
    ///
    /// Nothing is added if `trace` carries no frames.
    pub fn stack(self, trace: &dyn StackTrace) -> Self {
        let Some(logger) = &self.logger else {
            return self;
        };
        match StackSummarizer::new(logger.stack_drop).summarize(trace) {
            Some(summary) => self.field(Field::new("stack", summary)),
            None => self,
        }
    }

    /// Whether this event will be written.
    pub fn enabled(&self) -> bool {
        self.logger.is_some()
    }

    /// Send the event with a message.
    pub fn msg(self, message: impl fmt::Display) {
        let Event {
            logger,
            severity,
            fields,
        } = self;
        let message = message.to_string();

        match severity {
            Severity::Fatal => {
                if let Some(logger) = logger {
                    logger.write(Severity::Fatal, message, fields);
                    logger.flush();
                }
                std::process::exit(1);
            }
            Severity::Panic => {
                if let Some(logger) = &logger {
                    logger.write(Severity::Panic, message.clone(), fields);
                    logger.flush();
                }
                panic!("{message}");
            }
            severity => {
                if let Some(logger) = logger {
                    logger.write(severity, message, fields);
                }
            }
        }
    }

    /// Send the event without a message.
    pub fn send(self) {
        self.msg("")
    }
}
