//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] when a field violates one of its invariants (year range,
//!   empty name, non-positive price, future date, malformed chassis number,
//!   unparsable date bound, out of range pagination).
//! - [`KeyNotFound`] when an item looked up by id or chassis number does not
//!   exist.
//! - [`ExistingKey`] when a write would duplicate a chassis number.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid value: {0}")]
    Validation(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Map a unique-constraint violation raised by the store to
    /// [`EngineError::ExistingKey`], keeping every other failure as a
    /// database error.
    pub(crate) fn from_write(err: DbErr, key: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::ExistingKey(key.to_string()),
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
