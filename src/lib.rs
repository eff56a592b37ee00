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

//! zlog sets up readable console logging for command line tools.
//!
//! # Overview
//!
//! zlog maps a `-v` counter to a log level, renders records as compact console lines with
//! colored three letter level codes or emoji glyphs, and can duplicate output to a file, either
//! as plain text or as JSON lines. It integrates with the `log` crate.
//!
//! Levels follow the verbosity convention of command line tools: `0` is info, `1` debug, `2`
//! trace, `-1` warnings only, `-2` errors only and `-3` fatal only.
//!
//! # Examples
//!
//! Simple setup with a verbosity:
//!
//! ```
//! zlog::init_with_level(1);
//!
//! log::info!("This is an info message.");
//! log::debug!(port = 8080; "This is a debug message.");
//! ```
//!
//! Structured events and custom options:
//!
//! ```
//! use zlog::OutputFormat;
//! use zlog::Options;
//! use zlog::TimeFormat;
//!
//! let logger = zlog::new_logger(
//!     &Options::default()
//!         .format(OutputFormat::Unicode)
//!         .time_format(TimeFormat::Relative),
//! );
//! logger.info().str("setting", "unicode").int("level", 0).msg("A bunch of messages");
//! ```
//!
//! Errors carrying structured context:
//!
//! ```
//! let err = zlog::Error::new("Test Message").with_int("n", 3);
//! assert_eq!(err.to_string(), "Test Message n=3");
//! err.to_logger().error().msg(err.message());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod color;
pub mod layout;
pub mod stack;

mod error;
mod global;
mod level;
mod logger;
mod options;
mod record;
mod tee;

pub use self::append::Append;
pub use self::error::Error;
pub use self::global::console_options;
pub use self::global::init;
pub use self::global::init_with;
pub use self::global::init_with_level;
pub use self::global::level;
pub use self::global::logger;
pub use self::global::logl;
pub use self::global::set_level;
pub use self::global::set_logger;
pub use self::global::try_init_with;
pub use self::layout::Layout;
pub use self::level::LevelThreshold;
pub use self::level::Severity;
pub use self::logger::Context;
pub use self::logger::Event;
pub use self::logger::Logger;
pub use self::logger::new_logger;
pub use self::options::DEFAULT_STACK_DROP;
pub use self::options::Options;
pub use self::options::OutputFormat;
pub use self::options::TimeFormat;
pub use self::record::Field;
pub use self::record::Record;
pub use self::record::Value;
pub use self::tee::TeeBuilder;
pub use self::tee::tee;
