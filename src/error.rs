//! Error types for column transformation.

use thiserror::Error;

/// Errors that can occur while rewriting column tables.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Column transformation did not converge after {iterations} containers")]
    DidNotConverge { iterations: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
