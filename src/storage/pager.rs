use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

use log::{debug, info};

use crate::types::{
    PAGE_SIZE, PageNum, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS,
    error::{Result, StoreError},
    page::Page,
};

/// Owns the fixed array of pages and the optional backing file. Pages are
/// faulted in lazily, one backing-file image per page, and are never
/// individually deallocated. The backing file carries no header: it is the
/// raw concatenation of the page images, with a partial final page when the
/// last page is not fully occupied.
///
/// The file is assumed to be exclusively owned by one process; concurrent
/// opens of the same path are not guarded against.
pub struct Pager {
    file: Option<File>,
    file_length: u64,
    pages: Vec<Option<Box<Page>>>,
}

impl Pager {
    /// Open or create the backing file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!("opening existing database at {}", path.display());
        } else {
            info!("creating new database at {}", path.display());
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let file_length = file.metadata()?.len();
        Ok(Self {
            file: Some(file),
            file_length,
            pages: Self::empty_page_array(),
        })
    }

    /// A pager with no backing file; flush is a no-op.
    pub fn in_memory() -> Self {
        Self {
            file: None,
            file_length: 0,
            pages: Self::empty_page_array(),
        }
    }

    fn empty_page_array() -> Vec<Option<Box<Page>>> {
        let mut pages = Vec::with_capacity(TABLE_MAX_PAGES);
        pages.resize_with(TABLE_MAX_PAGES, || None);
        pages
    }

    /// Length of the backing file as of open (0 when in-memory).
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Number of materialized pages.
    pub fn page_count(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    /// Writable page buffer for `page_num`, faulting it in if absent.
    /// Fails with `TableFull` when the index is at or beyond the page
    /// ceiling.
    pub fn page_for_write(&mut self, page_num: PageNum) -> Result<&mut Page> {
        if page_num >= TABLE_MAX_PAGES {
            return Err(StoreError::TableFull {
                max_rows: TABLE_MAX_ROWS,
            });
        }
        if self.pages[page_num].is_none() {
            let page = self.load_page(page_num)?;
            self.pages[page_num] = Some(Box::new(page));
        }
        Ok(self.pages[page_num].get_or_insert_with(Default::default).as_mut())
    }

    /// Read-only page buffer for `page_num`, or `None` when the page is
    /// neither materialized nor backed by file bytes.
    pub fn page_for_read(&mut self, page_num: PageNum) -> Result<Option<&Page>> {
        if page_num >= TABLE_MAX_PAGES {
            return Ok(None);
        }
        if self.pages[page_num].is_none() {
            let offset = (page_num * PAGE_SIZE) as u64;
            if offset >= self.file_length {
                return Ok(None);
            }
            let page = self.load_page(page_num)?;
            self.pages[page_num] = Some(Box::new(page));
        }
        Ok(self.pages[page_num].as_deref())
    }

    /// Zero-filled page, overlaid with the backing-file bytes for this page
    /// range when the file covers it. A short read on the final partial page
    /// is expected: only the bytes the file actually holds are copied.
    fn load_page(&mut self, page_num: PageNum) -> Result<Page> {
        let mut page = Page::new();
        if let Some(file) = self.file.as_mut() {
            let offset = (page_num * PAGE_SIZE) as u64;
            if offset < self.file_length {
                let in_file = ((self.file_length - offset) as usize).min(PAGE_SIZE);
                file.seek(SeekFrom::Start(offset))?;
                file.read_exact(&mut page.data[..in_file])?;
                debug!("page {page_num}: read {in_file} bytes from file");
            }
        }
        debug!("allocated page {page_num}");
        Ok(page)
    }

    /// Write every materialized dirty page back to the backing file, full
    /// pages in whole and the final partial page only up to its occupied
    /// byte range, so uninitialized tail bytes are never persisted. No-op
    /// when in-memory.
    pub fn flush(&mut self, num_rows: usize) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        let full_pages = num_rows / ROWS_PER_PAGE;
        let tail_rows = num_rows % ROWS_PER_PAGE;

        for page_num in 0..full_pages {
            if let Some(page) = self.pages[page_num].as_deref_mut() {
                if page.is_dirty {
                    let offset = (page_num * PAGE_SIZE) as u64;
                    file.seek(SeekFrom::Start(offset))?;
                    file.write_all(&page.data)?;
                    page.is_dirty = false;
                    debug!("flushed page {page_num} ({PAGE_SIZE} bytes)");
                }
            }
        }
        if tail_rows > 0 {
            if let Some(page) = self.pages[full_pages].as_deref_mut() {
                if page.is_dirty {
                    let occupied = tail_rows * ROW_SIZE;
                    let offset = (full_pages * PAGE_SIZE) as u64;
                    file.seek(SeekFrom::Start(offset))?;
                    file.write_all(&page.data[..occupied])?;
                    page.is_dirty = false;
                    debug!("flushed partial page {full_pages} ({occupied} bytes)");
                }
            }
        }
        file.flush()?;

        let written_end = (full_pages * PAGE_SIZE + tail_rows * ROW_SIZE) as u64;
        self.file_length = self.file_length.max(written_end);
        Ok(())
    }
}
