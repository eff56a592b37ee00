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


use clap::ArgAction;
use clap::Parser;
use zlog::OutputFormat;
use zlog::Options;
use zlog::TimeFormat;

#[derive(Debug, Parser)]
struct Args {
    /// Verbose messages, repeat for more.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    let verbose = i32::from(args.verbose);

    zlog::init_with_level(verbose);
    log_messages(verbose, "color");

    zlog::set_logger(zlog::new_logger(
        &Options::default()
            .level(verbose)
            .format(OutputFormat::Unicode)
            .time_format(TimeFormat::Relative),
    ));
    log_messages(verbose, "unicode with seconds");

    zlog::set_logger(zlog::new_logger(
        &Options::default()
            .level(verbose)
            .format(OutputFormat::Monochrome)
            .time_format(TimeFormat::HighRes),
    ));
    log_messages(verbose, "monochrome");

    zlog::init();
    log_messages(verbose, "defaults");
}

fn log_messages(verbose: i32, setting: &str) {
    let logger = zlog::logger();
    logger
        .info()
        .int("level", i64::from(verbose))
        .str("setting", setting)
        .msg("A bunch of messages");
    logger.log().msg("This is a log message");
    logger.trace().msg("This is a trace message");
    logger.debug().msg("This is a debug message");
    logger.info().msg("This is a info message");
    logger.warn().msg("This is a warning message");
    logger.error().msg("This is a error message");
}
