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

//! Duplicate console output to a file.
//!
//! # Example
//!
//! ```no_run
//! use zlog::OutputFormat;
//! use zlog::Options;
//!
//! zlog::init_with_level(1);
//! let logger = zlog::tee(
//!     "log.json",
//!     Some(Options::default().format(OutputFormat::Json).overwrite(true)),
//! );
//! zlog::set_logger(logger);
//!
//! log::info!("ok");
//! ```

use std::path::PathBuf;

use crate::append::Append;
use crate::append::File;
use crate::append::Stderr;
use crate::layout::ConsoleLayout;
use crate::layout::JsonLayout;
use crate::layout::Layout;
use crate::level::LevelThreshold;
use crate::logger::Logger;
use crate::options::Options;
use crate::options::OutputFormat;

/// Duplicate logging output to the file at `path`.
///
/// The returned logger writes every record twice: to stderr, formatted with the current console
/// configuration (see [`new_logger`](crate::new_logger)), and to the file. With
/// [`OutputFormat::Json`] the file receives JSON lines; with any other format it receives the
/// console formatting without colors. The threshold is taken from the verbosity last set with
/// [`set_level`](crate::set_level).
///
/// Without options the file is truncated and written in monochrome.
///
/// This function terminates the process if the file cannot be opened: a fatal event is written to
/// the default logger and the process exits with status 1. Use [`TeeBuilder::try_build`] to
/// handle the error instead.
pub fn tee(path: impl Into<PathBuf>, options: Option<Options>) -> Logger {
    let options = options.unwrap_or_else(|| Options::default().format(OutputFormat::Monochrome));
    let builder = TeeBuilder::new(path)
        .console(crate::global::console_options())
        .file(options)
        .verbosity(crate::global::level());

    match builder.try_build() {
        Ok(logger) => logger,
        Err(err) => {
            crate::global::logger()
                .fatal()
                .str("error", format!("{err:#}"))
                .msg("Cannot tee output");
            unreachable!("fatal events terminate the process")
        }
    }
}

/// A builder to configure and create a tee logger.
#[derive(Debug)]
pub struct TeeBuilder {
    path: PathBuf,
    console: Options,
    file: Options,
    verbosity: i32,
}

impl TeeBuilder {
    /// Create a new builder writing to the file at `path`.
    ///
    /// Both sinks default to [`Options::default`], with the file in monochrome.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            console: Options::default(),
            file: Options::default().format(OutputFormat::Monochrome),
            verbosity: 0,
        }
    }

    /// Set the options of the console sink.
    pub fn console(mut self, options: Options) -> Self {
        self.console = options;
        self
    }

    /// Set the options of the file sink.
    ///
    /// [`Options::format`] selects JSON or console formatting, [`Options::overwrite`] whether an
    /// existing file is appended to (`true`) or truncated (`false`). Timestamps in the file
    /// follow the console options: a relative console time becomes unix seconds in JSON.
    pub fn file(mut self, options: Options) -> Self {
        self.file = options;
        self
    }

    /// Set the verbosity of the tee logger.
    pub fn verbosity(mut self, verbosity: i32) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Build the tee logger.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn try_build(self) -> anyhow::Result<Logger> {
        let console = ConsoleLayout::new(&self.console);
        let file = self.file_layout();
        self.build_with(Stderr::new(console), file)
    }

    fn file_layout(&self) -> Box<dyn Layout> {
        match self.file.format {
            OutputFormat::Json => Box::new(JsonLayout::new(&self.console.time_format)),
            _ => {
                let options = self.console.clone().format(OutputFormat::Monochrome);
                Box::new(ConsoleLayout::new(&options).no_color())
            }
        }
    }

    pub(crate) fn build_with(
        self,
        console: impl Append,
        file_layout: Box<dyn Layout>,
    ) -> anyhow::Result<Logger> {
        let file = File::open(&self.path, self.file.overwrite, file_layout)?;
        let appends: Vec<Box<dyn Append>> = vec![Box::new(console), Box::new(file)];
        let logger = Logger::new(appends)
            .timestamp(true)
            .stack_drop(self.console.stack_drop)
            .level(LevelThreshold::from_verbosity(self.verbosity));
        Ok(logger)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jiff::tz::TimeZone;
    use tempfile::TempDir;

    use super::*;
    use crate::append::Memory;
    use crate::options::TimeFormat;

    #[test]
    fn test_console_layout_without_colors_in_file() {
        crate::color::set_supports_color(true);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tee.log");
        let console_options = Options::default()
            .format(OutputFormat::Color)
            .time_format(TimeFormat::None);
        let builder = TeeBuilder::new(&path)
            .console(console_options.clone())
            .file(Options::default().format(OutputFormat::Color));
        let file_layout = builder.file_layout();
        let console = Memory::new(ConsoleLayout::new(&console_options).color(true));
        let logger = builder
            .build_with(console.clone(), file_layout)
            .unwrap()
            .timestamp(false);

        logger.warn().int("n", 1).msg("careful");
        logger.flush();

        assert_eq!(
            console.lines(),
            ["\x1b[38;5;208mWRN\x1b[0m careful \x1b[38;5;45mn=\x1b[0m1"]
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "WRN careful n=1\n");
    }

    #[test]
    fn test_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tee.json");
        let builder = TeeBuilder::new(&path)
            .file(Options::default().format(OutputFormat::Json))
            .verbosity(1);
        let file_layout = Box::new(JsonLayout::default().timezone(TimeZone::UTC));
        let console = Memory::new(
            ConsoleLayout::new(&Options::default().format(OutputFormat::Monochrome))
                .timezone(TimeZone::UTC),
        );
        let logger = builder.build_with(console.clone(), file_layout).unwrap();

        logger.trace().msg("dropped");
        for i in 0..3 {
            logger
                .debug()
                .int("i", i)
                .str("msg", format!("msg #{i}"))
                .msg("debug message");
        }
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(console.lines().len(), 3);
        for (i, (line, console_line)) in lines.iter().zip(console.lines()).enumerate() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["_zl"], "debug");
            assert_eq!(value["_zm"], "debug message");
            assert_eq!(value["i"], i as i64);
            assert!(value["_zts"].is_string());
            assert!(
                console_line.ends_with(&format!("DBG debug message i={i} msg=\"msg #{i}\"")),
                "{console_line}"
            );
        }
    }

    #[test]
    fn test_json_time_follows_console() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tee.json");
        let builder = TeeBuilder::new(&path)
            .console(Options::default().time_format(TimeFormat::Relative))
            .file(Options::default().format(OutputFormat::Json));
        let file_layout = builder.file_layout();
        let logger = builder
            .build_with(Memory::new(ConsoleLayout::new(&Options::default())), file_layout)
            .unwrap();

        logger.info().msg("hi");
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
        assert!(value["_zts"].is_i64(), "{content}");
        assert_eq!(value["_zm"], "hi");
    }
}
