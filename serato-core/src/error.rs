//! Error types for serato-core

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A database or crate file could not be opened for reading
    #[error("Could not open file at path {path:?}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer bytes were available than a tag, length or payload requires
    #[error("Truncated input: {0}")]
    TruncatedInput(String),

    /// Odd-length or ill-formed UTF-16 text payload
    #[error("Malformed text: {0}")]
    MalformedText(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Binary format error: {0}")]
    BinRw(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileOpen {
            path: path.into(),
            source,
        }
    }
}

impl From<binrw::Error> for Error {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Error::Io(io),
            other => Error::BinRw(other.to_string()),
        }
    }
}
