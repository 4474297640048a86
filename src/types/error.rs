use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table is full (capacity: {max_rows} rows)")]
    TableFull { max_rows: usize },

    #[error("Invalid record block: expected {expected} bytes, got {actual}")]
    InvalidRecord { expected: usize, actual: usize },

    #[error("Value for '{field}' is too long: {actual} bytes (max: {max})")]
    ValueTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Corrupt backing file: {details}")]
    CorruptFile { details: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
