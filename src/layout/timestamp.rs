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

use std::sync::OnceLock;

use jiff::Timestamp;
use jiff::Zoned;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::options::TimeFormat;

static PROCESS_START: OnceLock<Timestamp> = OnceLock::new();

/// Record the reference point of relative timestamps. Only the first call counts.
pub(crate) fn mark_process_start() -> Timestamp {
    *PROCESS_START.get_or_init(Timestamp::now)
}

/// Renders record timestamps for console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `[0004]`: whole seconds since `start`.
    Relative {
        /// The reference point.
        start: Timestamp,
    },
    /// Nothing.
    Suppressed,
    /// A strftime template.
    Template(String),
}

const DEFAULT_TEMPLATE: &str = "%Y-%m-%d %H:%M:%S";
const HIGHRES_TEMPLATE: &str = "%Y-%m-%d %H:%M:%S.%3f";

impl TimestampFormat {
    /// Select the renderer for a [`TimeFormat`].
    pub fn new(time_format: &TimeFormat) -> Self {
        match time_format {
            TimeFormat::Relative => TimestampFormat::Relative {
                start: mark_process_start(),
            },
            TimeFormat::None => TimestampFormat::Suppressed,
            TimeFormat::Default => TimestampFormat::Template(DEFAULT_TEMPLATE.to_string()),
            TimeFormat::HighRes => TimestampFormat::Template(HIGHRES_TEMPLATE.to_string()),
            TimeFormat::Custom(template) => TimestampFormat::Template(template.clone()),
        }
    }

    /// Render `ts` in `tz`.
    ///
    /// A template jiff cannot format is rendered as its raw text.
    pub fn render(&self, ts: Timestamp, tz: &TimeZone) -> String {
        match self {
            TimestampFormat::Relative { start } => {
                let secs = ts.duration_since(*start).as_secs().max(0);
                format!("[{secs:04}]")
            }
            TimestampFormat::Suppressed => String::new(),
            TimestampFormat::Template(template) => {
                let zoned = Zoned::new(ts, tz.clone());
                strtime::format(template.as_str(), &zoned).unwrap_or_else(|_| template.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn sample() -> Timestamp {
        "2024-08-11T14:44:57.172105Z".parse().unwrap()
    }

    #[test]
    fn test_calendar_formats() {
        let tz = TimeZone::UTC;
        let default = TimestampFormat::new(&TimeFormat::Default);
        assert_eq!(default.render(sample(), &tz), "2024-08-11 14:44:57");
        let highres = TimestampFormat::new(&TimeFormat::HighRes);
        assert_eq!(highres.render(sample(), &tz), "2024-08-11 14:44:57.172");
        let custom = TimestampFormat::new(&TimeFormat::Custom("%H:%M".to_string()));
        assert_eq!(custom.render(sample(), &tz), "14:44");
        let none = TimestampFormat::new(&TimeFormat::None);
        assert_eq!(none.render(sample(), &tz), "");
    }

    #[test]
    fn test_relative_seconds() {
        let start = sample();
        let format = TimestampFormat::Relative { start };
        let later = start + SignedDuration::from_millis(4_900);
        assert_eq!(format.render(later, &TimeZone::UTC), "[0004]");
        let much_later = start + SignedDuration::from_secs(12_345);
        assert_eq!(format.render(much_later, &TimeZone::UTC), "[12345]");
    }
}
