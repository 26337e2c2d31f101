//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a payload or a patch does not satisfy the
//!   schema (missing required field, wrong value kind, length or sign).
//! - [`Database`] thrown when the storage layer fails. The unit of work it
//!   happened in has already been rolled back.
//!
//! A predicate matching nothing is not an error, see [`Affected`].
//!
//!  [`Validation`]: EngineError::Validation
//!  [`Database`]: EngineError::Database
//!  [`Affected`]: crate::Affected
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid record: {0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
