pub mod statement;

use std::io::Write;

use log::info;

use crate::{
    executor::statement::Statement,
    storage::table::Table,
    types::{error::Result, row::Row},
};

/// Run one prepared statement against `table`, streaming any result rows to
/// `out`. Success/error framing (`Executed`, `Error: Table full`) is the
/// shell's concern; this layer returns the raw store outcome.
pub fn execute_statement(
    table: &mut Table,
    statement: &Statement,
    out: &mut impl Write,
) -> Result<()> {
    match statement {
        Statement::Insert(row) => execute_insert(table, row),
        Statement::Select => execute_select(table, out),
    }
}

pub fn execute_insert(table: &mut Table, row: &Row) -> Result<()> {
    table.insert(row)?;
    info!("inserted row id={} ({} rows total)", row.id, table.num_rows());
    Ok(())
}

/// Write one `(<id> <username> <email>)` line per row, in insertion order.
pub fn execute_select(table: &mut Table, out: &mut impl Write) -> Result<()> {
    let mut count = 0;
    for row in table.scan() {
        writeln!(out, "{}", row?)?;
        count += 1;
    }
    info!("selected {count} rows");
    Ok(())
}
