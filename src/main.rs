//! Points Spender CLI
//!
//! Reads a payer ledger CSV, spends points oldest-first and prints how many
//! points were taken from each payer.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- 5000 transactions.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use points_spender::{run, CliArgs};
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    // lossy, so non-UTF-8 arguments still end up as parse or I/O errors
    let args = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    let result = CliArgs::parse(args).and_then(|args| {
        let stdout = io::stdout();
        let handle = stdout.lock();
        run(&args, handle)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
