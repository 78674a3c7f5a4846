//! Error types for shamsi operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShamsiError {
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, ShamsiError>;
