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

use zlog::Logger;
use zlog::Options;
use zlog::OutputFormat;
use zlog::TimeFormat;
use zlog::append::Memory;
use zlog::layout::ConsoleLayout;

// the default logger is process-wide, so everything lives in one test
#[test]
fn test_global_logger_and_verbosity() {
    zlog::init_with_level(0);

    let layout = ConsoleLayout::new(
        &Options::default()
            .format(OutputFormat::Monochrome)
            .time_format(TimeFormat::None),
    );
    let memory = Memory::new(layout);
    zlog::set_logger(Logger::new(vec![Box::new(memory.clone())]).timestamp(false));
    zlog::set_level(1);
    assert_eq!(zlog::level(), 1);

    log::trace!("This is a trace message");
    log::debug!("This is a debug message");
    log::info!(n = 3; "This is a info message");
    assert_eq!(
        memory.lines(),
        ["DBG This is a debug message", "INF This is a info message n=3"]
    );

    zlog::logl(2).msg("too chatty");
    zlog::logl(1).int("step", 1).msg("chatty enough");
    assert_eq!(memory.lines().len(), 3);
    assert_eq!(memory.lines()[2], "DBG chatty enough step=1");

    zlog::set_level(-3);
    log::error!("suppressed");
    zlog::logger().error().msg("suppressed");
    zlog::logger().log().msg("always");
    assert_eq!(memory.lines().len(), 4);
    assert_eq!(memory.lines()[3], "always");

    let err = zlog::Error::new("from the default context").augment("x");
    assert_eq!(err.to_string(), "from the default context nested#1=x");
}
