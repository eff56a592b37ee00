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

//! The process-wide default logger.
//!
//! The functions here are meant to be called once during startup from a single thread, after
//! which the default logger is only read. Concurrent reconfiguration is memory safe but the
//! last writer wins.

use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

use crate::layout::mark_process_start;
use crate::level::LevelThreshold;
use crate::logger::Event;
use crate::logger::Logger;
use crate::logger::console_logger;
use crate::logger::new_logger;
use crate::options::Options;

static LOGGER: RwLock<Option<Logger>> = RwLock::new(None);
static CONSOLE_OPTIONS: RwLock<Option<Options>> = RwLock::new(None);
static VERBOSITY: AtomicI32 = AtomicI32::new(0);
static FACADE_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Forwards records of the `log` crate to the current default logger.
struct Facade;

static FACADE: Facade = Facade;

impl log::Log for Facade {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        log::Log::enabled(&logger(), metadata)
    }

    fn log(&self, record: &log::Record) {
        log::Log::log(&logger(), record)
    }

    fn flush(&self) {
        logger().flush()
    }
}

/// Set up the default console logger with verbosity `0`.
///
/// # Panics
///
/// Panics if another implementation of the `log` facade has been installed.
pub fn init() {
    init_with(&Options::default())
}

/// Set up the default console logger with the given verbosity.
///
/// This pairs well with a counting `-v` flag:
///
/// ```no_run
/// let verbose = 1; // e.g. from clap's `ArgAction::Count`
/// zlog::init_with_level(verbose);
///
/// log::info!("Info message");
/// log::debug!("Debug message");
/// ```
///
/// # Panics
///
/// Panics if another implementation of the `log` facade has been installed.
pub fn init_with_level(level: i32) {
    init_with(&Options::default().level(level))
}

/// Set up the default console logger with the given options.
///
/// May be called again to reconfigure the default logger.
///
/// # Panics
///
/// Panics if another implementation of the `log` facade has been installed.
pub fn init_with(options: &Options) {
    try_init_with(options)
        .expect("zlog::init_with should not be called after another logger is installed");
}

/// Set up the default console logger with the given options.
///
/// # Errors
///
/// Returns an error if another implementation of the `log` facade has been installed. The default
/// logger is replaced regardless.
pub fn try_init_with(options: &Options) -> Result<(), log::SetLoggerError> {
    mark_process_start();
    set_logger(new_logger(options));
    set_level(options.level);
    install_facade()
}

fn install_facade() -> Result<(), log::SetLoggerError> {
    if FACADE_INSTALLED.load(Ordering::Acquire) {
        return Ok(());
    }
    log::set_logger(&FACADE)?;
    FACADE_INSTALLED.store(true, Ordering::Release);
    Ok(())
}

/// The current default logger.
///
/// If none has been set up, a console logger with default options is created.
pub fn logger() -> Logger {
    if let Some(logger) = LOGGER.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
        return logger.clone();
    }

    let mut slot = LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    slot.get_or_insert_with(|| console_logger(&Options::default()))
        .clone()
}

/// Replace the default logger, e.g. with the result of [`tee`](crate::tee).
pub fn set_logger(logger: Logger) {
    *LOGGER.write().unwrap_or_else(PoisonError::into_inner) = Some(logger);
}

/// Set the verbosity of the default logger, see [`Options::level`].
///
/// This also sets the maximum level of the `log` facade and the verbosity checked by [`logl`].
pub fn set_level(level: i32) {
    VERBOSITY.store(level, Ordering::Relaxed);
    let threshold = LevelThreshold::from_verbosity(level);
    let logger = logger().level(threshold);
    set_logger(logger);
    log::set_max_level(threshold.to_level_filter());
}

/// The verbosity last set with [`set_level`].
pub fn level() -> i32 {
    VERBOSITY.load(Ordering::Relaxed)
}

/// An event on the default logger that is only written if `level` is within the verbosity.
///
/// The event's severity is the one matching `level`: `0` info, `1` debug, `2` and above trace.
///
/// ```
/// zlog::logl(3).str("detail", "very chatty").msg("only with -vvv");
/// ```
pub fn logl(level: i32) -> Event {
    if level > self::level() {
        return Event::disabled();
    }
    let severity = LevelThreshold::from_verbosity(level).severity();
    logger().event(severity)
}

pub(crate) fn remember_console_options(options: &Options) {
    *CONSOLE_OPTIONS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(options.clone());
}

/// The options of the last console logger created with [`new_logger`].
pub fn console_options() -> Options {
    CONSOLE_OPTIONS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}
