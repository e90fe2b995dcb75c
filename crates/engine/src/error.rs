//! The module contains the errors the engine can throw.
//!
//! Most of the engine degrades instead of failing (bad amounts become zero,
//! bad dates drop out of date groupings), so the errors left are the ones a
//! caller has to act on:
//!
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`ExistingKey`] thrown when a tag with the same name already exists.
//! - [`InvalidMonth`] thrown when a calendar month is out of range.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidMonth`]: EngineError::InvalidMonth
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid tag: {0}")]
    InvalidTag(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
}
