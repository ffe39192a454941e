//! Module for handling source files and locating offsets within them.

use std::{
    borrow::Cow,
    fmt::Debug,
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::Getters;

use super::{file_provider::FileProvider, Error};

/// Represents a source file that contains the raw source bytes.
///
/// The content is kept as bytes: deciding what is valid text is the job of
/// the scanner, which reports malformed input instead of refusing it.
#[derive(Clone, Getters)]
pub struct SourceFile {
    /// Get the path of the source file.
    #[get = "pub"]
    path: PathBuf,
    /// Get the content of the source file
    #[get = "pub"]
    content: Vec<u8>,
    lines: Vec<Range<usize>>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("lines", &self.lines)
            .finish()
    }
}

impl SourceFile {
    /// Creates a source file from in-memory bytes.
    #[must_use]
    pub fn from_bytes(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Arc<Self> {
        let content = content.into();
        let lines = get_line_byte_positions(&content);

        Arc::new(Self {
            path: path.into(),
            content,
            lines,
        })
    }

    /// Load the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when reading the file contents.
    pub fn load(path: &Path, provider: &impl FileProvider) -> Result<Arc<Self>, Error> {
        let source = provider.read_bytes(path)?;
        Ok(Self::from_bytes(path, source.into_owned()))
    }

    /// Get the line of the source file at the given line number, including its line terminator.
    ///
    /// Numbering starts at 1. Bytes that are not valid UTF-8 are replaced.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line == 0 {
            return None;
        }

        self.lines
            .get(line - 1)
            .map(|range| String::from_utf8_lossy(&self.content[range.clone()]))
    }

    /// Get the number of lines in the source file.
    #[must_use]
    pub fn line_amount(&self) -> usize {
        self.lines.len()
    }

    /// Get the [`Location`] of a given byte index.
    ///
    /// The end of the content is a valid location; anything past it is not.
    #[must_use]
    pub fn get_location(&self, byte_index: usize) -> Option<Location> {
        if byte_index > self.content.len() {
            return None;
        }

        let line = self
            .lines
            .partition_point(|range| range.end <= byte_index)
            .min(self.lines.len() - 1);
        let line_start = self.lines[line].start;

        // columns count characters, starting at 1
        let column = String::from_utf8_lossy(&self.content[line_start..byte_index])
            .chars()
            .count()
            + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }

    /// Get the relative path of the source file from the current working directory.
    #[must_use]
    pub fn path_relative(&self) -> Option<PathBuf> {
        pathdiff::diff_paths(&self.path, std::env::current_dir().ok()?)
    }
}

/// Pointing to a particular location in a source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// Line number of the location (starts at 1).
    pub line: usize,

    /// Column number of the location (starts at 1).
    pub column: usize,
}

/// Get the byte positions of the lines in the given text.
fn get_line_byte_positions(text: &[u8]) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    let mut skip = false;

    for (byte, char) in text.iter().enumerate() {
        if skip {
            skip = false;
            continue;
        }

        // lf
        if *char == b'\n' {
            #[allow(clippy::range_plus_one)]
            results.push(current_position..byte + 1);

            current_position = byte + 1;
        }

        // crlf
        if *char == b'\r' {
            if text.get(byte + 1) == Some(&b'\n') {
                results.push(current_position..byte + 2);

                current_position = byte + 2;

                skip = true;
            } else {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 1);

                current_position = byte + 1;
            }
        }
    }

    // add the last line
    results.push(current_position..text.len());

    results
}
