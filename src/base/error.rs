/// An error that occurred while loading or scanning source code.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("An error occurred while working with Input/Output: {0}")]
    IoError(String),
    #[error("An error occurred while lexing the source code at byte {offset}: {0}", offset = .0.offset())]
    LexicalError(#[from] crate::lexical::Error),
    #[error("An error occurred: {0}")]
    Other(&'static str),
}

impl Error {
    /// Byte offset in the source the error points at, if any.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::LexicalError(err) => Some(err.offset()),
            Self::IoError(_) | Self::Other(_) => None,
        }
    }
}

/// A specialized [`Result`] type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
