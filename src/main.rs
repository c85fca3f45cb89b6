//! Online Retail Report CLI
//!
//! Command-line interface for reporting on an online retail CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- online_retail.csv                        # interactive menu
//! cargo run -- online_retail.csv products --limit 20
//! cargo run -- online_retail.csv countries
//! cargo run -- online_retail.csv report --only revenue
//! cargo run -- online_retail.csv search 85123A
//! cargo run -- --format csv --on-malformed strict online_retail.csv report > report.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: logging verbosity on stderr (default `warn`; `info` shows load summaries)
//!
//! # Exit Codes
//!
//! - 0: Success (including a stock code that was not found)
//! - 1: Error (missing arguments, file not readable, strict-policy parse failure, etc.)

use retail_report::cli;
use std::io;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    if let Err(e) = cli::run(&args, &mut input, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
