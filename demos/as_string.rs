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

#[derive(Debug, Parser)]
struct Args {
    /// Verbose messages, repeat for more.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    zlog::init_with_level(i32::from(args.verbose));
    log::info!("ok");

    let err: Box<dyn std::error::Error> = Box::new(
        zlog::Error::new("Test Message")
            .with_int("n", 3)
            .with_str("file", "myfile.rs"),
    );
    println!("err = {err}");

    if let Some((logger, message)) = zlog::Error::as_logger(err.as_ref()) {
        logger.error().msg(message);
        logger
            .warn()
            .str("message", message)
            .msg("This was an error");
    }
}
