use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Prints a disk-space utilization report for an SQLite database file.
#[derive(Parser)]
#[command(name = "litestat", version, about)]
struct Cli {
    /// Path to the database file to analyze
    database: PathBuf
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match litestat::generate_report(&cli.database) {
        Ok(report) => {
            print!("{report}");

            ExitCode::SUCCESS
        }

        Err(err) => {
            eprintln!("Error: {err:#}");

            ExitCode::FAILURE
        }
    }
}
