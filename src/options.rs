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

//! Options to configure console loggers and tee outputs.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;

/// The default number of stack frames dropped by the stack summarizer.
pub const DEFAULT_STACK_DROP: usize = 8;

/// Options that can be used to initialize a logger.
///
/// Options are plain values: once passed to a constructor such as [`new_logger`] they are copied
/// into the created logger and later changes have no effect on it.
///
/// # Examples
///
/// ```
/// use zlog::OutputFormat;
/// use zlog::Options;
/// use zlog::TimeFormat;
///
/// let options = Options::default()
///     .level(1)
///     .time_format(TimeFormat::HighRes)
///     .format(OutputFormat::Unicode);
/// assert_eq!(options.level, 1);
/// ```
///
/// [`new_logger`]: crate::new_logger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// The verbosity of the logger.
    ///
    /// `0` is the info level, positive numbers increase the verbosity (`1` debug, `2` trace) and
    /// negative numbers decrease it (`-1` warnings only, `-2` errors only, `-3` fatal only). This
    /// maps naturally onto a repeatable `-v` command line flag.
    pub level: i32,
    /// How timestamps are rendered.
    pub time_format: TimeFormat,
    /// How level labels and field names are rendered.
    pub format: OutputFormat,
    /// Whether a tee file is appended to (`true`) or truncated (`false`).
    pub overwrite: bool,
    /// How many trailing frames the stack summarizer drops.
    pub stack_drop: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: 0,
            time_format: TimeFormat::Default,
            format: OutputFormat::Color,
            overwrite: false,
            stack_drop: DEFAULT_STACK_DROP,
        }
    }
}

impl Options {
    /// Set the verbosity level.
    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Set the timestamp format.
    pub fn time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set whether a tee file is appended to.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set how many trailing frames the stack summarizer drops.
    pub fn stack_drop(mut self, stack_drop: usize) -> Self {
        self.stack_drop = stack_drop;
        self
    }
}

/// Selects how timestamps are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// Seconds since process start, like `[0004]`.
    Relative,
    /// No timestamp at all.
    None,
    /// `2006-01-02 15:04:05`.
    #[default]
    Default,
    /// `2006-01-02 15:04:05.000`.
    HighRes,
    /// A user supplied strftime template, see [`jiff::fmt::strtime`].
    Custom(String),
}

impl FromStr for TimeFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "s" => TimeFormat::Relative,
            "none" => TimeFormat::None,
            "" | "default" => TimeFormat::Default,
            "highres" => TimeFormat::HighRes,
            template => TimeFormat::Custom(template.to_string()),
        })
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::Relative => f.write_str("s"),
            TimeFormat::None => f.write_str("none"),
            TimeFormat::Default => f.write_str("default"),
            TimeFormat::HighRes => f.write_str("highres"),
            TimeFormat::Custom(template) => f.write_str(template),
        }
    }
}

impl<'de> Deserialize<'de> for TimeFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // infallible
        Ok(s.parse().unwrap_or_default())
    }
}

/// Selects the level labels and field coloring of a sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Three letter level codes colored with 256-color escapes.
    #[default]
    Color,
    /// Plain three letter level codes.
    Monochrome,
    /// JSON objects. Only meaningful for tee files; consoles render it as [`Monochrome`].
    ///
    /// [`Monochrome`]: OutputFormat::Monochrome
    Json,
    /// Emoji glyphs as level labels.
    Unicode,
}

impl OutputFormat {
    /// Whether field names may be colored with this format.
    pub fn is_colorful(self) -> bool {
        matches!(self, OutputFormat::Color | OutputFormat::Unicode)
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "color" => Ok(OutputFormat::Color),
            "mono" | "monochrome" | "bw" => Ok(OutputFormat::Monochrome),
            "json" => Ok(OutputFormat::Json),
            "unicode" => Ok(OutputFormat::Unicode),
            _ => Err(anyhow::anyhow!("unknown output format: {s:?}")),
        }
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_format() {
        let cases = [
            ("s", TimeFormat::Relative),
            ("none", TimeFormat::None),
            ("", TimeFormat::Default),
            ("default", TimeFormat::Default),
            ("highres", TimeFormat::HighRes),
            ("%H:%M", TimeFormat::Custom("%H:%M".to_string())),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<TimeFormat>().unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("BW".parse::<OutputFormat>().unwrap(), OutputFormat::Monochrome);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("sepia".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_deserialize_options() {
        let options: Options =
            serde_json::from_str(r#"{"level": -1, "time_format": "s", "format": "unicode"}"#)
                .unwrap();
        assert_eq!(
            options,
            Options::default()
                .level(-1)
                .time_format(TimeFormat::Relative)
                .format(OutputFormat::Unicode)
        );
        assert_eq!(options.stack_drop, DEFAULT_STACK_DROP);
    }
}
