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


use std::fs;

use tempfile::TempDir;
use zlog::OutputFormat;
use zlog::Options;
use zlog::TimeFormat;

// `tee` reads the process-wide console options and verbosity, so everything lives in one test
#[test]
fn test_tee_follows_global_configuration() {
    zlog::init_with(
        &Options::default()
            .level(1)
            .format(OutputFormat::Monochrome)
            .time_format(TimeFormat::Relative),
    );
    assert_eq!(zlog::console_options().time_format, TimeFormat::Relative);

    let temp_dir = TempDir::new().unwrap();

    // without options: monochrome console formatting, existing content truncated
    let text_path = temp_dir.path().join("run.log");
    fs::write(&text_path, "stale line\n").unwrap();
    let logger = zlog::tee(&text_path, None);
    logger.trace().msg("too chatty");
    logger.debug().int("n", 1).msg("debug message");
    logger.flush();

    let content = fs::read_to_string(&text_path).unwrap();
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1, "{content:?}");
    assert!(lines[0].starts_with('['), "{content:?}");
    assert!(lines[0].ends_with("] DBG debug message n=1"), "{content:?}");
    assert!(!content.contains('\x1b'), "{content:?}");

    // JSON file: relative console time becomes unix seconds
    let json_path = temp_dir.path().join("run.json");
    let logger = zlog::tee(
        &json_path,
        Some(Options::default().format(OutputFormat::Json).overwrite(true)),
    );
    zlog::set_logger(logger);
    log::info!("hi");
    log::trace!("too chatty");
    zlog::logger().flush();

    let content = fs::read_to_string(&json_path).unwrap();
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1, "{content:?}");
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["_zl"], "info");
    assert_eq!(value["_zm"], "hi");
    assert!(value["_zts"].is_i64(), "{content:?}");
}
