//! The `rulescan` scanner.
//!
//! `rulescan` turns source text of a small rule and indicator expression
//! language (`close XABOVE sma(close, 20)`, `IF rsi < 30`) into classified
//! tokens with byte offsets and literal text.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;

use std::path::Path;

use base::{source_file::SourceFile, FileProvider, Handler, Result};

use crate::lexical::token_stream::TokenStream;

/// Converts the given source file to tokens.
///
/// Lexical errors are reported to `handler` and counted in
/// [`TokenStream::error_count`]; they do not make this function fail.
///
/// # Errors
/// - If an error occurs while reading the file.
pub fn tokenize(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    path: &Path,
) -> Result<TokenStream> {
    tracing::info!("Tokenizing the source code at path: {}", path.display());

    let source_file = SourceFile::load(path, file_provider)?;

    Ok(TokenStream::tokenize(&source_file, handler))
}
