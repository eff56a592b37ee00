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

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;

use anyhow::Context;

use crate::append::Append;
use crate::layout::Layout;
use crate::record::Record;

/// An appender that writes log records to a file.
///
/// The file handle is held for the lifetime of the appender; every record is written with a
/// single `write_all` call.
#[derive(Debug)]
pub struct File {
    layout: Box<dyn Layout>,
    writer: Mutex<std::fs::File>,
}

impl File {
    /// Open `path` for logging, creating it if absent.
    ///
    /// An existing file is appended to if `append` is `true` and truncated otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(
        path: impl AsRef<Path>,
        append: bool,
        layout: impl Into<Box<dyn Layout>>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o666);
        }
        let file = options
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        Ok(Self {
            layout: layout.into(),
            writer: Mutex::new(file),
        })
    }
}

impl Append for File {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&bytes)?;
        Ok(())
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::layout::JsonLayout;
    use crate::level::Severity;

    fn write_line(path: &Path, append: bool, message: &str) {
        let file = File::open(path, append, JsonLayout::default()).unwrap();
        file.append(&Record::new(Severity::Info, message)).unwrap();
        file.flush();
    }

    #[test]
    fn test_truncate_and_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.log");

        write_line(&path, false, "first");
        write_line(&path, true, "second");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\"_zl\":\"info\",\"_zm\":\"first\"}\n{\"_zl\":\"info\",\"_zm\":\"second\"}\n"
        );

        write_line(&path, false, "third");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\"_zl\":\"info\",\"_zm\":\"third\"}\n"
        );
    }

    #[test]
    fn test_open_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("test.log");
        let err = File::open(&path, true, JsonLayout::default()).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"), "{err}");
    }
}
