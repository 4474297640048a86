use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use lumbung::{repl, storage::table::Table};

/// A minimal single-table row store with a line-oriented shell.
#[derive(Parser)]
#[command(name = "lumbung", version, about)]
struct Args {
    /// Path to the backing database file; omit for an in-memory session
    db_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut table = match &args.db_path {
        Some(path) => match Table::open(path) {
            Ok(table) => table,
            Err(err) => {
                eprintln!("Error: could not open database: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Table::in_memory(),
    };

    if let Err(err) = repl::run(&mut table) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
