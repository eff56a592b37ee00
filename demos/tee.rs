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

#[derive(Debug, Parser)]
struct Args {
    /// Verbose messages, repeat for more.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    zlog::init_with_level(i32::from(args.verbose));

    let logger = zlog::tee(
        "log.json",
        Some(Options::default().format(OutputFormat::Json).overwrite(true)),
    );
    zlog::set_logger(logger);
    log::info!("ok");

    let err = zlog::Error::new("Test Message")
        .with_int("n", 3)
        .with_str("file", "myfile.rs");
    err.to_logger()
        .warn()
        .str("message", err.message())
        .msg("This was an error");

    for i in 0..5 {
        log::debug!(i = i, msg = format!("msg #{i}"); "debug message");
    }
}
