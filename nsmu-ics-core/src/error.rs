//! Error types for the NSMU ICS core library.

use thiserror::Error;

/// Library-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network timeout")]
    Timeout,

    #[error("Cannot parse lesson data from HTML: {0}")]
    Extract(#[from] ExtractError),
}

/// Field-extraction failure reported by one extractor.
///
/// These are recoverable: a failing extractor voids its fragment, nothing
/// more. The builder never panics on malformed fragment structure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    #[error("fewer than two HH:MM times in fragment")]
    Time,

    #[error("no DD.MM.YYYY date in fragment")]
    Date,

    #[error("lesson header is missing or malformed")]
    Header,

    #[error("lesson location is missing")]
    Location,

    #[error("date/time components are out of range")]
    Timestamp,
}

pub type Result<T> = std::result::Result<T, Error>;
