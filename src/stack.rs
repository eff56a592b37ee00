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

//! Condensed stack traces for log fields.
//!
//! A summary looks like `main.rs:68 | server.rs:225 | lib.rs:1371`.

use std::backtrace::Backtrace;
use std::backtrace::BacktraceStatus;
use std::path::Path;

use crate::options::DEFAULT_STACK_DROP;

/// The text returned when a frame cannot be resolved to a symbol.
pub const UNRESOLVED_FRAME: &str = "internal: cannot resolve stack frame";

/// A single stack frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// The resolved symbol, `None` if resolution failed.
    pub symbol: Option<String>,
    /// The source file, if known.
    pub file: Option<String>,
    /// The source line, if known.
    pub line: Option<u32>,
}

/// The capability of exposing a list of stack frames, innermost first.
pub trait StackTrace {
    /// The frames, or `None` if no trace was captured.
    fn frames(&self) -> Option<Vec<Frame>>;
}

impl StackTrace for Backtrace {
    fn frames(&self) -> Option<Vec<Frame>> {
        if self.status() != BacktraceStatus::Captured {
            return None;
        }
        Some(parse_backtrace(&self.to_string()))
    }
}

impl StackTrace for anyhow::Error {
    fn frames(&self) -> Option<Vec<Frame>> {
        StackTrace::frames(self.backtrace())
    }
}

impl StackTrace for Vec<Frame> {
    fn frames(&self) -> Option<Vec<Frame>> {
        (!self.is_empty()).then(|| self.to_vec())
    }
}

/// Renders condensed stack traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSummarizer {
    drop: usize,
}

impl Default for StackSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_DROP)
    }
}

impl StackSummarizer {
    /// Create a summarizer hiding `drop` trailing frames, usually runtime bootstrap code.
    pub fn new(drop: usize) -> Self {
        Self { drop }
    }

    /// Summarize the frames of `trace` as `basename:line | basename:line | ...`.
    ///
    /// Returns `None` if `trace` has no frames. If there are more than `drop` frames, the last
    /// `drop` frames are left out. If any rendered frame has no symbol, the fixed
    /// [`UNRESOLVED_FRAME`] text is returned instead of a partial trace.
    ///
    /// ```
    /// use zlog::stack::Frame;
    /// use zlog::stack::StackSummarizer;
    ///
    /// let frame = |file: &str, line| Frame {
    ///     symbol: Some("f".to_string()),
    ///     file: Some(file.to_string()),
    ///     line: Some(line),
    /// };
    /// let frames = vec![frame("src/main.rs", 68), frame("/rustc/library/std/src/rt.rs", 195)];
    /// let summary = StackSummarizer::new(1).summarize(&frames);
    /// assert_eq!(summary.as_deref(), Some("main.rs:68"));
    /// ```
    pub fn summarize(&self, trace: &dyn StackTrace) -> Option<String> {
        let frames = trace.frames()?;
        let keep = if frames.len() > self.drop {
            frames.len() - self.drop
        } else {
            frames.len()
        };

        let mut summary = String::new();
        for (i, frame) in frames.iter().take(keep).enumerate() {
            if frame.symbol.is_none() {
                return Some(UNRESOLVED_FRAME.to_string());
            }
            if i > 0 {
                summary.push_str(" | ");
            }
            let basename = frame
                .file
                .as_deref()
                .and_then(|file| Path::new(file).file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "?".to_string());
            summary.push_str(&format!("{basename}:{}", frame.line.unwrap_or_default()));
        }
        Some(summary)
    }
}

/// Parse the display form of a captured [`Backtrace`]:
///
/// ```text
///    0: app::main
///              at ./src/main.rs:68:5
///    1: <unknown>
/// ```
fn parse_backtrace(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = vec![];
    for line in text.lines() {
        let line = line.trim();
        if let Some(location) = line.strip_prefix("at ") {
            let Some(frame) = frames.last_mut() else {
                continue;
            };
            // file:line:column, the file itself may contain colons
            let mut parts = location.rsplitn(3, ':');
            let _column = parts.next();
            let line = parts.next().and_then(|line| line.parse().ok());
            let file = parts.next();
            if let (Some(file), Some(line)) = (file, line) {
                frame.file = Some(file.to_string());
                frame.line = Some(line);
            }
        } else if let Some((index, symbol)) = line.split_once(": ") {
            if index.chars().all(|c| c.is_ascii_digit()) {
                let symbol = (symbol != "<unknown>").then(|| symbol.to_string());
                frames.push(Frame {
                    symbol,
                    ..Default::default()
                });
            }
        }
    }
    frames
}
