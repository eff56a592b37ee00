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

//! Severities of log records and verbosity thresholds.

use std::fmt;

/// The severity of a log record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The "trace" level.
    Trace,
    /// The "debug" level.
    Debug,
    /// The "info" level.
    Info,
    /// The "warn" level.
    Warn,
    /// The "error" level.
    Error,
    /// The "fatal" level. Emitting a fatal record terminates the process.
    Fatal,
    /// The "panic" level. Emitting a panic record panics the current thread.
    Panic,
    /// A record without level, always emitted.
    NoLevel,
    /// A level tag this crate doesn't know about.
    Unknown(String),
}

impl Severity {
    /// Parse a lowercase level tag such as `"warn"`.
    ///
    /// Any text that is not a known tag is kept verbatim in [`Severity::Unknown`].
    pub fn from_tag(tag: &str) -> Severity {
        match tag {
            "trace" => Severity::Trace,
            "debug" => Severity::Debug,
            "info" => Severity::Info,
            "warn" => Severity::Warn,
            "error" => Severity::Error,
            "fatal" => Severity::Fatal,
            "panic" => Severity::Panic,
            unknown => Severity::Unknown(unknown.to_string()),
        }
    }

    /// The lowercase tag of this severity, `None` for [`Severity::NoLevel`].
    pub fn tag(&self) -> Option<&str> {
        match self {
            Severity::Trace => Some("trace"),
            Severity::Debug => Some("debug"),
            Severity::Info => Some("info"),
            Severity::Warn => Some("warn"),
            Severity::Error => Some("error"),
            Severity::Fatal => Some("fatal"),
            Severity::Panic => Some("panic"),
            Severity::NoLevel => None,
            Severity::Unknown(tag) => Some(tag.as_str()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or_default())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warn,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

/// The minimum severity a record needs to be emitted.
///
/// Variants are ordered from least to most verbose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelThreshold {
    /// Only fatal records.
    Fatal,
    /// Error records and above.
    Error,
    /// Warn records and above.
    Warn,
    /// Info records and above.
    #[default]
    Info,
    /// Debug records and above.
    Debug,
    /// Everything.
    Trace,
}

impl LevelThreshold {
    /// Map a verbosity to a threshold.
    ///
    /// `0` is [`Info`](LevelThreshold::Info), every step up adds verbosity and every step down
    /// removes some. The mapping clamps at both ends: `-3` and below is fatal-only, `2` and above
    /// is trace.
    ///
    /// ```
    /// use zlog::LevelThreshold;
    ///
    /// assert_eq!(LevelThreshold::from_verbosity(1), LevelThreshold::Debug);
    /// assert_eq!(LevelThreshold::from_verbosity(-10), LevelThreshold::Fatal);
    /// ```
    pub fn from_verbosity(verbosity: i32) -> LevelThreshold {
        match verbosity {
            i32::MIN..=-3 => LevelThreshold::Fatal,
            -2 => LevelThreshold::Error,
            -1 => LevelThreshold::Warn,
            0 => LevelThreshold::Info,
            1 => LevelThreshold::Debug,
            2.. => LevelThreshold::Trace,
        }
    }

    /// Whether a record of the given severity passes this threshold.
    pub fn allows(self, severity: &Severity) -> bool {
        let required = match severity {
            Severity::Trace => LevelThreshold::Trace,
            Severity::Debug => LevelThreshold::Debug,
            Severity::Info => LevelThreshold::Info,
            Severity::Warn => LevelThreshold::Warn,
            Severity::Error => LevelThreshold::Error,
            Severity::Fatal => LevelThreshold::Fatal,
            Severity::Panic | Severity::NoLevel | Severity::Unknown(_) => return true,
        };
        required <= self
    }

    /// The most verbose severity this threshold lets through.
    pub fn severity(self) -> Severity {
        match self {
            LevelThreshold::Fatal => Severity::Fatal,
            LevelThreshold::Error => Severity::Error,
            LevelThreshold::Warn => Severity::Warn,
            LevelThreshold::Info => Severity::Info,
            LevelThreshold::Debug => Severity::Debug,
            LevelThreshold::Trace => Severity::Trace,
        }
    }

    /// The closest [`log::LevelFilter`] for the `log` facade.
    ///
    /// `log` has no fatal level, so [`Fatal`](LevelThreshold::Fatal) maps to `Error` and the
    /// remaining filtering happens in the logger.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LevelThreshold::Fatal | LevelThreshold::Error => log::LevelFilter::Error,
            LevelThreshold::Warn => log::LevelFilter::Warn,
            LevelThreshold::Info => log::LevelFilter::Info,
            LevelThreshold::Debug => log::LevelFilter::Debug,
            LevelThreshold::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbosity_table() {
        let cases = [
            (i32::MIN, LevelThreshold::Fatal),
            (-4, LevelThreshold::Fatal),
            (-3, LevelThreshold::Fatal),
            (-2, LevelThreshold::Error),
            (-1, LevelThreshold::Warn),
            (0, LevelThreshold::Info),
            (1, LevelThreshold::Debug),
            (2, LevelThreshold::Trace),
            (3, LevelThreshold::Trace),
            (i32::MAX, LevelThreshold::Trace),
        ];
        for (verbosity, expected) in cases {
            assert_eq!(LevelThreshold::from_verbosity(verbosity), expected);
        }
    }

    #[test]
    fn test_from_verbosity_monotonic() {
        let mut last = LevelThreshold::from_verbosity(-100);
        for verbosity in -99..100 {
            let current = LevelThreshold::from_verbosity(verbosity);
            assert!(current >= last, "{verbosity}: {current:?} < {last:?}");
            last = current;
        }
    }

    #[test]
    fn test_allows() {
        let debug = LevelThreshold::Debug;
        assert!(!debug.allows(&Severity::Trace));
        assert!(debug.allows(&Severity::Debug));
        assert!(debug.allows(&Severity::Info));
        assert!(debug.allows(&Severity::Fatal));

        let fatal = LevelThreshold::Fatal;
        assert!(!fatal.allows(&Severity::Error));
        assert!(fatal.allows(&Severity::Fatal));
        assert!(fatal.allows(&Severity::Panic));
        assert!(fatal.allows(&Severity::NoLevel));
    }

    #[test]
    fn test_tags() {
        for tag in ["trace", "debug", "info", "warn", "error", "fatal", "panic"] {
            assert_eq!(Severity::from_tag(tag).tag(), Some(tag));
        }
        assert_eq!(
            Severity::from_tag("notice"),
            Severity::Unknown("notice".to_string())
        );
        assert_eq!(Severity::NoLevel.tag(), None);
    }
}
