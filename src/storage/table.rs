use std::path::Path;

use log::{debug, info, warn};

use crate::{
    storage::pager::Pager,
    types::{
        PageNum, ROW_SIZE, ROWS_PER_PAGE, RowIndex, TABLE_MAX_ROWS,
        error::{Result, StoreError},
        row::Row,
    },
};

/// Append-only, insertion-ordered row store over the pager's fixed page
/// array. `num_rows` is derived from the backing-file length on open and is
/// the single source of truth for occupancy; the invariant
/// `num_rows <= TABLE_MAX_ROWS` holds at all times.
pub struct Table {
    pager: Pager,
    num_rows: usize,
}

/// Where row `index` lives: (page number, slot within that page).
fn row_location(index: RowIndex) -> (PageNum, usize) {
    (index / ROWS_PER_PAGE, index % ROWS_PER_PAGE)
}

impl Table {
    /// Open a table backed by `path`, creating the file if absent.
    /// `num_rows` is the file length in whole rows; a trailing incomplete
    /// row is ignored rather than rejected, since full-page images carry a
    /// few slack bytes past the last row boundary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pager = Pager::open(path)?;
        let num_rows = pager.file_length() as usize / ROW_SIZE;
        if num_rows > TABLE_MAX_ROWS {
            return Err(StoreError::CorruptFile {
                details: format!(
                    "file holds {num_rows} rows, table capacity is {TABLE_MAX_ROWS}"
                ),
            });
        }
        info!("opened table with {num_rows} rows");
        Ok(Self { pager, num_rows })
    }

    /// An empty table with no backing file.
    pub fn in_memory() -> Self {
        Self {
            pager: Pager::in_memory(),
            num_rows: 0,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Append `row` at index `num_rows`. The capacity check precedes the
    /// write, and `num_rows` is incremented only after a successful encode,
    /// so a failed insert never mutates the table.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        if self.num_rows >= TABLE_MAX_ROWS {
            warn!("insert rejected: table full at {} rows", self.num_rows);
            return Err(StoreError::TableFull {
                max_rows: TABLE_MAX_ROWS,
            });
        }
        let (page_num, slot) = row_location(self.num_rows);
        let page = self.pager.page_for_write(page_num)?;
        row.serialize_into(page.row_slot_mut(slot))?;
        self.num_rows += 1;
        debug!("inserted row {} (id {})", self.num_rows - 1, row.id);
        Ok(())
    }

    /// Lazy scan of all rows in insertion order. Each call starts a fresh
    /// pass from index 0 and yields exactly `num_rows` items, regardless of
    /// unused capacity in the last page.
    pub fn scan(&mut self) -> Scan<'_> {
        Scan {
            table: self,
            cursor: 0,
        }
    }

    /// Write dirty pages back to the backing file. Called once at orderly
    /// shutdown; durability mid-session is not guaranteed.
    pub fn flush(&mut self) -> Result<()> {
        self.pager.flush(self.num_rows)
    }
}

pub struct Scan<'a> {
    table: &'a mut Table,
    cursor: RowIndex,
}

impl Iterator for Scan<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.table.num_rows {
            return None;
        }
        let (page_num, slot) = row_location(self.cursor);
        let page = match self.table.pager.page_for_read(page_num) {
            Ok(Some(page)) => page,
            Ok(None) => {
                return Some(Err(StoreError::CorruptFile {
                    details: format!("page {page_num} missing for row {}", self.cursor),
                }));
            }
            Err(e) => return Some(Err(e)),
        };
        let row = Row::deserialize(page.row_slot(slot));
        self.cursor += 1;
        Some(row)
    }
}
