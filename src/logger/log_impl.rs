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

use std::io::Write;

use crate::level::Severity;
use crate::logger::Logger;
use crate::record::Field;
use crate::record::Record;

struct KvCollector {
    fields: Vec<Field>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.fields.push(Field::new(key.as_str(), value));
        Ok(())
    }
}

/// Bridges the [`log`] facade: `log::info!(n = 3; "hello")` becomes an info record with the
/// field `n=3`.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, &Severity::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let severity = Severity::from(record.level());
        if !Logger::enabled(self, &severity) {
            return;
        }

        let mut collector = KvCollector { fields: vec![] };
        // collecting into a vec never fails
        let _ = record.key_values().visit(&mut collector);

        self.write(severity, record.args().to_string(), collector.fields);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

pub(super) fn handle_error(record: &Record, error: anyhow::Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {message}
    Record: {record:?}
    Error: {error}
"###,
        message = record.message(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {message}
    Record: {record:?}
    Error: {error}
    Fallback error: {fallback_error}
"###,
        message = record.message(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}
