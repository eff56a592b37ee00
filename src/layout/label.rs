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

use std::borrow::Cow;
use std::io::Write;

use crate::color;
use crate::level::Severity;
use crate::options::OutputFormat;

/// Renders the level column of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelLabel {
    /// `TRC DBG INF WRN ERR FTL PNC`.
    Monochrome,
    /// The monochrome codes painted with the [palette](crate::color).
    Color,
    /// One glyph per severity.
    Unicode,
}

impl LevelLabel {
    /// Select the label renderer of an output format.
    pub fn new(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Color => LevelLabel::Color,
            OutputFormat::Unicode => LevelLabel::Unicode,
            OutputFormat::Monochrome | OutputFormat::Json => LevelLabel::Monochrome,
        }
    }

    /// Render the label of `severity`.
    ///
    /// [`LevelLabel::Color`] falls back to monochrome codes if `colored` is `false`. Unknown
    /// level tags are reported on stdout.
    pub fn render(self, severity: &Severity, colored: bool) -> Cow<'static, str> {
        self.render_with(severity, colored, &mut std::io::stdout())
    }

    pub(crate) fn render_with(
        self,
        severity: &Severity,
        colored: bool,
        diagnostics: &mut dyn Write,
    ) -> Cow<'static, str> {
        let label = match (self, colored) {
            (LevelLabel::Monochrome, _) | (LevelLabel::Color, false) => monochrome(severity),
            (LevelLabel::Color, true) => {
                if let Some(label) = painted(severity) {
                    return Cow::Owned(label);
                }
                None
            }
            (LevelLabel::Unicode, _) => unicode(severity),
        };
        match label {
            Some(label) => Cow::Borrowed(label),
            None => fallback(severity, diagnostics),
        }
    }
}

fn monochrome(severity: &Severity) -> Option<&'static str> {
    match severity {
        Severity::Trace => Some("TRC"),
        Severity::Debug => Some("DBG"),
        Severity::Info => Some("INF"),
        Severity::Warn => Some("WRN"),
        Severity::Error => Some("ERR"),
        Severity::Fatal => Some("FTL"),
        Severity::Panic => Some("PNC"),
        Severity::NoLevel | Severity::Unknown(_) => None,
    }
}

fn painted(severity: &Severity) -> Option<String> {
    let label = monochrome(severity)?;
    let tint = match severity {
        Severity::Trace | Severity::Debug => color::GRAY,
        Severity::Info => color::GREEN,
        Severity::Warn => color::ORANGE,
        _ => color::RED,
    };
    Some(color::paint(label, tint).to_string())
}

fn unicode(severity: &Severity) -> Option<&'static str> {
    match severity {
        Severity::Trace => Some("🔹"),
        Severity::Debug => Some("🔷"),
        Severity::Info => Some("🟢"),
        Severity::Warn => Some("🔶"),
        Severity::Error | Severity::Fatal | Severity::Panic => Some("❌"),
        Severity::NoLevel | Severity::Unknown(_) => None,
    }
}

fn fallback(severity: &Severity, diagnostics: &mut dyn Write) -> Cow<'static, str> {
    match severity {
        Severity::Unknown(tag) if tag == "log" => Cow::Borrowed("LOG"),
        Severity::Unknown(tag) if tag.is_empty() => Cow::Borrowed("nolevel"),
        Severity::Unknown(tag) => {
            let _ = writeln!(diagnostics, "unexpected level {tag:?}");
            Cow::Owned(tag.to_uppercase())
        }
        _ => Cow::Borrowed(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEVERITIES: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Panic,
    ];

    fn render_all(label: LevelLabel, colored: bool) -> Vec<String> {
        SEVERITIES
            .iter()
            .map(|s| label.render(s, colored).into_owned())
            .collect()
    }

    #[test]
    fn test_monochrome_labels() {
        let expected = ["TRC", "DBG", "INF", "WRN", "ERR", "FTL", "PNC"];
        assert_eq!(render_all(LevelLabel::Monochrome, true), expected);
        assert_eq!(render_all(LevelLabel::Color, false), expected);
    }

    #[test]
    fn test_color_labels() {
        color::set_supports_color(true);
        let expected = [
            "\x1b[38;5;246mTRC\x1b[0m",
            "\x1b[38;5;246mDBG\x1b[0m",
            "\x1b[38;5;10mINF\x1b[0m",
            "\x1b[38;5;208mWRN\x1b[0m",
            "\x1b[38;5;196mERR\x1b[0m",
            "\x1b[38;5;196mFTL\x1b[0m",
            "\x1b[38;5;196mPNC\x1b[0m",
        ];
        assert_eq!(render_all(LevelLabel::Color, true), expected);
    }

    #[test]
    fn test_unicode_labels() {
        let expected = ["🔹", "🔷", "🟢", "🔶", "❌", "❌", "❌"];
        assert_eq!(render_all(LevelLabel::Unicode, true), expected);
        assert_eq!(render_all(LevelLabel::Unicode, false), expected);
    }

    #[test]
    fn test_special_labels() {
        for label in [LevelLabel::Monochrome, LevelLabel::Color, LevelLabel::Unicode] {
            assert_eq!(label.render(&Severity::NoLevel, true), "");
            assert_eq!(label.render(&Severity::Unknown("log".into()), true), "LOG");
            assert_eq!(label.render(&Severity::Unknown("".into()), true), "nolevel");
        }
    }

    #[test]
    fn test_unknown_level_is_reported() {
        for label in [LevelLabel::Monochrome, LevelLabel::Color, LevelLabel::Unicode] {
            let mut diagnostics = Vec::new();
            let rendered =
                label.render_with(&Severity::Unknown("notice".into()), true, &mut diagnostics);
            assert_eq!(rendered, "NOTICE");
            assert_eq!(
                String::from_utf8(diagnostics).unwrap(),
                "unexpected level \"notice\"\n"
            );
        }

        let mut diagnostics = Vec::new();
        LevelLabel::Color.render_with(&Severity::Unknown("log".into()), true, &mut diagnostics);
        LevelLabel::Color.render_with(&Severity::NoLevel, true, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
