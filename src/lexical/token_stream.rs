//! Contains the [`TokenStream`] struct, the output of scanning a whole source file.

use std::fmt::{Debug, Display};

use derive_more::Deref;
use getset::CopyGetters;
use itertools::Itertools as _;

use crate::base::{self, source_file::SourceFile, Handler};

use super::{
    scanner::{ScannedToken, Scanner},
    token::Token,
    Error,
};

/// Is the list of tokens of a source file.
///
/// The terminating [`Token::Eof`] is not part of the stream.
#[derive(Clone, PartialEq, Eq, Hash, Deref, CopyGetters)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<ScannedToken<'static>>,

    /// Get the number of lexical errors encountered while scanning.
    #[get_copy = "pub"]
    error_count: usize,
}

impl Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}

/// Forwards lexical errors to a handler of crate-level errors.
struct Forward<'h, H>(&'h H);

impl<H: Handler<base::Error>> Handler<Error> for Forward<'_, H> {
    fn receive(&self, error: Error) {
        self.0.receive(error.into());
    }
}

impl TokenStream {
    /// Scans the given source file to the end.
    ///
    /// Lexical errors are passed on to `handler`; they do not stop scanning.
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %source_file.path().display()))]
    pub fn tokenize(source_file: &SourceFile, handler: &impl Handler<base::Error>) -> Self {
        let mut scanner = Scanner::new(source_file.content(), Forward(handler));

        let mut tokens = Vec::new();
        loop {
            let scanned = scanner.scan();
            if scanned.token == Token::Eof {
                break;
            }
            tokens.push(scanned.into_owned());
        }

        let error_count = scanner.error_count();
        tracing::debug!(tokens = tokens.len(), error_count, "Scanned source file");

        Self {
            tokens,
            error_count,
        }
    }

    /// Whether any lexical error was encountered.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Returns the kinds of the tokens in order.
    pub fn kinds(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().map(|scanned| scanned.token)
    }

    /// Dissolves this struct into its tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<ScannedToken<'static>> {
        self.tokens
    }
}
