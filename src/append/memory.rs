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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::append::Append;
use crate::layout::Layout;
use crate::record::Record;

/// An appender that keeps formatted lines in memory.
///
/// Clones share the same buffer, so a clone can be handed to a logger while the original is kept
/// to inspect the output.
///
/// # Examples
///
/// ```
/// use zlog::append::Memory;
/// use zlog::layout::JsonLayout;
///
/// let buffer = Memory::new(JsonLayout::default());
/// let logger = zlog::Logger::new(vec![Box::new(buffer.clone())]);
/// logger.info().msg("hello");
/// assert_eq!(buffer.lines().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Memory {
    layout: Arc<dyn Layout>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl Memory {
    /// Creates a new `Memory` appender with the given layout.
    pub fn new(layout: impl Layout) -> Self {
        Self {
            layout: Arc::new(layout),
            lines: Arc::default(),
        }
    }

    /// The lines appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All lines, each terminated by a newline.
    pub fn contents(&self) -> String {
        self.lines().iter().map(|line| format!("{line}\n")).collect()
    }
}

impl Append for Memory {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let bytes = self.layout.format(record)?;
        let line = String::from_utf8_lossy(&bytes).into_owned();
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
        Ok(())
    }
}
