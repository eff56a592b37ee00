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


//! Color utilities.
//!
//! The palette uses 256-color escape sequences (`ESC[38;5;<n>m`) picked to stay readable on
//! terminals with a dark background. Text is colored with [`colored`], whose global override is
//! kept in step with [`supports_color`].

use std::sync::OnceLock;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

pub use colored::Color;
use colored::ColoredString;
use colored::Colorize;

/// Yellow.
pub const YELLOW: Color = Color::AnsiColor(226);
/// Orange, used for warnings.
pub const ORANGE: Color = Color::AnsiColor(208);
/// Gray, used for trace and debug.
pub const GRAY: Color = Color::AnsiColor(246);
/// Green, used for info.
pub const GREEN: Color = Color::AnsiColor(10);
/// Red, used for errors.
pub const RED: Color = Color::AnsiColor(196);
/// Cyan, used for field names.
pub const CYAN: Color = Color::AnsiColor(45);
/// Magenta.
pub const MAGENTA: Color = Color::AnsiColor(207);
/// Blue.
pub const BLUE: Color = Color::AnsiColor(33);

/// Look up a palette color by its lowercase name.
pub fn from_name(name: &str) -> Option<Color> {
    match name {
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "gray" => Some(GRAY),
        "green" => Some(GREEN),
        "red" => Some(RED),
        "cyan" => Some(CYAN),
        "magenta" => Some(MAGENTA),
        "blue" => Some(BLUE),
        _ => None,
    }
}

/// Paint `text` with `color`.
///
/// The escapes are only emitted while the process [supports colors](supports_color).
pub fn paint(text: impl Into<String>, color: Color) -> ColoredString {
    // probes once and syncs the override of `colored`
    supports_color();
    ColoredString::from(text.into()).color(color)
}

/// Wrap `text` in the escape sequence of `color`, followed by a reset.
///
/// ```
/// zlog::color::set_supports_color(true);
/// let text = zlog::color::colorize(zlog::color::ORANGE, "WRN");
/// assert_eq!(text, "\x1b[38;5;208mWRN\x1b[0m");
/// ```
pub fn colorize(color: Color, text: impl std::fmt::Display) -> String {
    paint(text.to_string(), color).to_string()
}

/// Like [`colorize`], but looks the color up by name. Unknown names leave the text unchanged.
pub fn named_colorize(name: &str, text: impl std::fmt::Display) -> String {
    match from_name(name) {
        Some(color) => colorize(color, text),
        None => text.to_string(),
    }
}

const UNSET: u8 = 0;
const DISABLED: u8 = 1;
const ENABLED: u8 = 2;

static OVERRIDE: AtomicU8 = AtomicU8::new(UNSET);
static DETECTED: OnceLock<bool> = OnceLock::new();

/// Whether colored output is supported by the current process.
///
/// The terminal is probed once on first call and the result is applied to
/// [`colored::control::set_override`]. Use [`set_supports_color`] to override it.
pub fn supports_color() -> bool {
    match OVERRIDE.load(Ordering::Relaxed) {
        DISABLED => false,
        ENABLED => true,
        _ => *DETECTED.get_or_init(|| {
            let detected = detect();
            colored::control::set_override(detected);
            detected
        }),
    }
}

/// Force colored output on or off for the rest of the process.
///
/// This is meant to be called once during startup, e.g. from a `--no-color` flag.
pub fn set_supports_color(enabled: bool) {
    let value = if enabled { ENABLED } else { DISABLED };
    OVERRIDE.store(value, Ordering::Relaxed);
    colored::control::set_override(enabled);
}

fn detect() -> bool {
    let term = std::env::var("TERM").unwrap_or_default();
    // xterm and friends understand escapes already
    if term.contains("term") {
        return true;
    }
    enable_virtual_terminal()
}

#[cfg(windows)]
fn enable_virtual_terminal() -> bool {
    colored::control::set_virtual_terminal(true).is_ok()
}

#[cfg(not(windows))]
fn enable_virtual_terminal() -> bool {
    true
}
