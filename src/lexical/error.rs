//! Contains the lexical error types reported by the scanner.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;

/// Represents an error that occurred during the lexical analysis of the source code.
///
/// Lexical errors are never fatal: the scanner reports them and keeps going.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, EnumAsInner, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IllegalCharacter(IllegalCharacter),
    #[error(transparent)]
    IllegalNul(IllegalNul),
    #[error(transparent)]
    IllegalEncoding(IllegalEncoding),
    #[error(transparent)]
    IllegalByteOrderMark(IllegalByteOrderMark),
}

impl Error {
    /// Byte offset of the offending character in the scanned buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::IllegalCharacter(err) => err.offset,
            Self::IllegalNul(err) => err.offset,
            Self::IllegalEncoding(err) => err.offset,
            Self::IllegalByteOrderMark(err) => err.offset,
        }
    }
}

/// A character that does not start any token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub struct IllegalCharacter {
    /// Byte offset of the character.
    pub offset: usize,

    /// The character itself.
    pub character: char,
}

impl Display for IllegalCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "illegal character U+{:04X} {:?}",
            u32::from(self.character),
            self.character
        )
    }
}

/// A zero byte, which is not allowed anywhere in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[error("illegal character NUL")]
pub struct IllegalNul {
    /// Byte offset of the zero byte.
    pub offset: usize,
}

/// A byte sequence that is not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[error("illegal UTF-8 encoding")]
pub struct IllegalEncoding {
    /// Byte offset of the first byte that could not be decoded.
    pub offset: usize,
}

/// A byte order mark anywhere but at the very start of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[error("illegal byte order mark")]
pub struct IllegalByteOrderMark {
    /// Byte offset of the byte order mark.
    pub offset: usize,
}
