use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, row::Row};

/// One parsed client statement. Field validation (id sign, column widths)
/// happens here, before a `Row` is ever built; the codec below re-checks
/// widths so truncation is impossible at either layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("String is too long. Maximum size is {max} for {field}")]
    StringTooLong { field: &'static str, max: usize },

    #[error("ID must be a positive integer")]
    NegativeId,

    #[error("Unrecognized keyword at start of '{0}'")]
    Unrecognized(String),
}

impl Statement {
    pub fn prepare(input: &str) -> Result<Self, PrepareError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        match parts.next() {
            Some("insert") => Self::prepare_insert(parts),
            Some("select") => {
                if parts.next().is_some() {
                    warn!("select takes no arguments: {input}");
                    return Err(PrepareError::SyntaxError);
                }
                Ok(Statement::Select)
            }
            _ => Err(PrepareError::Unrecognized(input.to_string())),
        }
    }

    fn prepare_insert<'a>(
        mut parts: impl Iterator<Item = &'a str>,
    ) -> Result<Self, PrepareError> {
        let (Some(id), Some(username), Some(email), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PrepareError::SyntaxError);
        };
        let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
        if id < 0 {
            return Err(PrepareError::NegativeId);
        }
        let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;
        if username.len() > COLUMN_USERNAME_SIZE {
            return Err(PrepareError::StringTooLong {
                field: "username",
                max: COLUMN_USERNAME_SIZE,
            });
        }
        if email.len() > COLUMN_EMAIL_SIZE {
            return Err(PrepareError::StringTooLong {
                field: "email",
                max: COLUMN_EMAIL_SIZE,
            });
        }
        let row = Row::new(id, username, email).map_err(|_| PrepareError::SyntaxError)?;
        Ok(Statement::Insert(row))
    }
}
