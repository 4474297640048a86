use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{
    COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, ID_OFFSET, ID_SIZE, ROW_SIZE,
    USERNAME_OFFSET,
    error::{Result, StoreError},
};

/*
 * Row layout on disk (292 bytes, no delimiters):
 * ┌──────────────┬───────────────────────────┬──────────────────────────┐
 * │ id (4 bytes) │ username (32 bytes)       │ email (256 bytes)        │
 * │ u32 LE       │ UTF-8, NUL-padded         │ UTF-8, NUL-padded        │
 * └──────────────┴───────────────────────────┴──────────────────────────┘
 */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Build a row, rejecting field values wider than their fixed column.
    /// Oversize values are always rejected, never truncated.
    pub fn new(id: u32, username: &str, email: &str) -> Result<Self> {
        check_column_width("username", username, COLUMN_USERNAME_SIZE)?;
        check_column_width("email", email, COLUMN_EMAIL_SIZE)?;
        Ok(Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
        })
    }

    /// Pack the row into `slot` at the fixed field offsets. The slot must be
    /// exactly `ROW_SIZE` bytes; field widths are re-checked before any byte
    /// is written, so a failed call leaves the slot untouched.
    pub fn serialize_into(&self, slot: &mut [u8]) -> Result<()> {
        if slot.len() != ROW_SIZE {
            return Err(StoreError::InvalidRecord {
                expected: ROW_SIZE,
                actual: slot.len(),
            });
        }
        check_column_width("username", &self.username, COLUMN_USERNAME_SIZE)?;
        check_column_width("email", &self.email, COLUMN_EMAIL_SIZE)?;

        slot[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_padded(&mut slot[USERNAME_OFFSET..EMAIL_OFFSET], &self.username);
        write_padded(&mut slot[EMAIL_OFFSET..ROW_SIZE], &self.email);
        Ok(())
    }

    /// Unpack a row from a `ROW_SIZE` block, trimming the NUL padding from
    /// the text fields.
    pub fn deserialize(block: &[u8]) -> Result<Self> {
        if block.len() != ROW_SIZE {
            return Err(StoreError::InvalidRecord {
                expected: ROW_SIZE,
                actual: block.len(),
            });
        }
        let id = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        let username = read_padded(&block[USERNAME_OFFSET..EMAIL_OFFSET])?;
        let email = read_padded(&block[EMAIL_OFFSET..ROW_SIZE])?;
        Ok(Self {
            id,
            username,
            email,
        })
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.id, self.username, self.email)
    }
}

fn check_column_width(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(StoreError::ValueTooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

fn write_padded(dest: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    dest[..bytes.len()].copy_from_slice(bytes);
    dest[bytes.len()..].fill(0);
}

fn read_padded(bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let text = std::str::from_utf8(&bytes[..end]).map_err(|e| StoreError::CorruptFile {
        details: format!("text field is not valid UTF-8: {e}"),
    })?;
    Ok(text.to_string())
}
