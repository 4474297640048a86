use std::io::{self, BufRead, IsTerminal, Write};

use log::warn;
use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    executor::{execute_statement, statement::Statement},
    storage::table::Table,
    types::error::{Result, StoreError},
};

const PROMPT: &str = "db > ";
const HISTORY_FILE: &str = ".lumbung_history";

/// Drive the shell until `.exit` or end of input. Interactive sessions get a
/// rustyline editor with history; piped sessions get a plain buffered-stdin
/// loop with the same prompt and output framing, so scripted transcripts
/// match the interactive ones. The table is flushed before returning on
/// every path.
pub fn run(table: &mut Table) -> Result<()> {
    if io::stdin().is_terminal() {
        run_interactive(table)
    } else {
        run_piped(table)
    }
}

fn run_interactive(table: &mut Table) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(io::Error::other)?;
    let _ = rl.load_history(HISTORY_FILE);
    let mut out = io::stdout();
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);
                if !dispatch(table, &line, &mut out)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                table.flush()?;
                break;
            }
            Err(err) => return Err(StoreError::Io(io::Error::other(err))),
        }
    }
    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}

fn run_piped(table: &mut Table) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            table.flush()?;
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !dispatch(table, line, &mut out)? {
            break;
        }
    }
    Ok(())
}

/// Handle one input line. Returns `Ok(false)` when the session should end.
fn dispatch(table: &mut Table, line: &str, out: &mut impl Write) -> Result<bool> {
    if line.starts_with('.') {
        return do_meta_command(table, line, out);
    }
    match Statement::prepare(line) {
        Ok(statement) => match execute_statement(table, &statement, out) {
            Ok(()) => writeln!(out, "Executed")?,
            Err(StoreError::TableFull { .. }) => writeln!(out, "Error: Table full")?,
            Err(err) => return Err(err),
        },
        Err(err) => {
            warn!("could not prepare statement: {line}");
            writeln!(out, "{err}")?;
        }
    }
    Ok(true)
}

fn do_meta_command(table: &mut Table, line: &str, out: &mut impl Write) -> Result<bool> {
    match line {
        ".exit" => {
            table.flush()?;
            Ok(false)
        }
        ".help" => {
            writeln!(
                out,
                r#"Available commands:
  .help                      - Show this help message
  .exit                      - Flush the table and exit
  insert <id> <name> <email> - Insert a new row
  select                     - Print every row in insertion order"#
            )?;
            Ok(true)
        }
        _ => {
            writeln!(out, "Unrecognized command {line}")?;
            Ok(true)
        }
    }
}
