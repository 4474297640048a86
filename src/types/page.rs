use crate::types::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE};

/*
 * Page layout on disk (4096 bytes):
 * ┌─────────────────────────────────────────────────────────────────┐
 * │ slot 0 (292) │ slot 1 (292) │ ... │ slot 13 (292) │ slack (8)   │
 * └─────────────────────────────────────────────────────────────────┘
 * Rows are packed contiguously at slot * ROW_SIZE with no per-row
 * headers and no free list; rows are appended and never moved. The
 * slack tail is never addressed by a slot.
 */

pub struct Page {
    pub data: Vec<u8>,
    pub is_dirty: bool,
}

impl Page {
    pub fn new() -> Self {
        Self {
            data: vec![0; PAGE_SIZE],
            is_dirty: false,
        }
    }

    pub fn row_slot(&self, slot: usize) -> &[u8] {
        debug_assert!(slot < ROWS_PER_PAGE);
        let start = slot * ROW_SIZE;
        &self.data[start..start + ROW_SIZE]
    }

    /// Mutable view of one row slot; marks the page dirty.
    pub fn row_slot_mut(&mut self, slot: usize) -> &mut [u8] {
        debug_assert!(slot < ROWS_PER_PAGE);
        self.is_dirty = true;
        let start = slot * ROW_SIZE;
        &mut self.data[start..start + ROW_SIZE]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
