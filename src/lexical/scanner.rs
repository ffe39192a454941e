//! Contains the [`Scanner`] state machine and the [`ScannedToken`] it produces.

use std::{borrow::Cow, fmt::Display};

use getset::CopyGetters;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::base::Handler;

use super::{
    error::{IllegalByteOrderMark, IllegalCharacter, IllegalEncoding, IllegalNul},
    token::{Keywords, Token},
    Error,
};

/// Byte order mark, only permitted as the very first character.
const BOM: char = '\u{FEFF}';

/// Is a single token returned by [`Scanner::scan`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScannedToken<'a> {
    /// Byte offset of the first character of the token.
    pub offset: usize,

    /// Kind of the token.
    pub token: Token,

    /// Exact spelling of identifiers, keywords and numbers; empty for every other token.
    pub literal: Cow<'a, str>,
}

impl<'a> ScannedToken<'a> {
    /// Detaches the token from the scanned buffer.
    #[must_use]
    pub fn into_owned(self) -> ScannedToken<'static> {
        ScannedToken {
            offset: self.offset,
            token: self.token,
            literal: Cow::Owned(self.literal.into_owned()),
        }
    }

    /// Returns the literal, or the canonical spelling of the token if there is none.
    #[must_use]
    pub fn text(&self) -> &str {
        if self.literal.is_empty() {
            self.token.as_str()
        } else {
            &self.literal
        }
    }
}

impl Display for ScannedToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Converts a byte buffer into tokens, one [`scan`](Scanner::scan) call at a time.
///
/// Lexical errors never stop the scanner. Each one is passed to the handler
/// exactly once, counted in [`error_count`](Scanner::error_count), and the
/// offending character is returned as [`Token::Illegal`].
///
/// Once the end of the buffer is reached every further call returns
/// [`Token::Eof`] at an offset equal to the buffer length.
#[derive(Debug, CopyGetters)]
pub struct Scanner<'a, H> {
    src: &'a [u8],
    handler: H,
    keywords: Keywords,

    // scanning state
    ch: Option<char>,
    ch_reported: bool,
    /// Get the byte offset of the current character.
    #[get_copy = "pub"]
    offset: usize,
    rd_offset: usize,

    /// Get the number of errors encountered so far.
    #[get_copy = "pub"]
    error_count: usize,
}

impl<'a, H: Handler<Error>> Scanner<'a, H> {
    /// Creates a scanner positioned at the first character of `src`.
    ///
    /// A byte order mark at the very start of the buffer is skipped silently.
    /// Pass `&handler` to keep using the handler after scanning.
    pub fn new(src: &'a [u8], handler: H) -> Self {
        Self::with_keywords(src, handler, Keywords::new())
    }

    /// Creates a scanner that resolves identifiers against the given keyword table.
    pub fn with_keywords(src: &'a [u8], handler: H, keywords: Keywords) -> Self {
        let mut scanner = Self {
            src,
            handler,
            keywords,
            ch: Some(' '),
            ch_reported: false,
            offset: 0,
            rd_offset: 0,
            error_count: 0,
        };

        scanner.next();
        if scanner.ch == Some(BOM) {
            scanner.next();
        }

        scanner
    }

    /// Scans the next token.
    ///
    /// Every call except the ones at the end of the buffer consumes at least
    /// one character.
    pub fn scan(&mut self) -> ScannedToken<'a> {
        self.skip_whitespace();

        let offset = self.offset;

        let (token, literal) = match self.ch {
            Some(ch) if is_letter(ch) => {
                let literal = self.scan_identifier();
                (self.keywords.lookup(&literal), literal)
            }
            Some(ch) if is_digit(ch) => self.scan_number(false),
            current => {
                let reported = self.ch_reported;
                // always make progress
                self.next();
                self.scan_punctuation(current, offset, reported)
            }
        };

        ScannedToken {
            offset,
            token,
            literal,
        }
    }

    /// Classifies a character that was already consumed.
    fn scan_punctuation(
        &mut self,
        current: Option<char>,
        offset: usize,
        reported: bool,
    ) -> (Token, Cow<'a, str>) {
        let token = match current {
            None => Token::Eof,
            Some(',') => Token::Comma,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,
            Some('[') => Token::LBrack,
            Some(']') => Token::RBrack,
            Some('+') => Token::Add,
            Some('-') => Token::Sub,
            Some('*') => Token::Mul,
            Some('/') => Token::Quo,
            Some('=') => Token::Eql,
            Some(';') => Token::Semicolon,
            Some(':') => self.switch2(Token::Colon, Token::Assign),
            Some('.') if self.ch.is_some_and(|ch| ch.is_ascii_digit()) => {
                return self.scan_number(true);
            }
            Some('.') => Token::Period,
            Some('<') => self.switch3(Token::Lss, Token::Leq, Token::Neq),
            Some('>') => self.switch2(Token::Gtr, Token::Geq),
            Some(character) => {
                // `next` already reported NULs, bad encodings and stray BOMs
                if !reported {
                    self.error(IllegalCharacter { offset, character }.into());
                }
                Token::Illegal
            }
        };

        (token, Cow::Borrowed(""))
    }

    fn scan_identifier(&mut self) -> Cow<'a, str> {
        let start = self.offset;
        while self.ch.is_some_and(|ch| is_letter(ch) || is_digit(ch)) {
            self.next();
        }
        self.literal(start)
    }

    /// Scans a number, including the `.` the caller consumed when `seen_decimal_point` is set.
    fn scan_number(&mut self, mut seen_decimal_point: bool) -> (Token, Cow<'a, str>) {
        let mut start = self.offset;
        if seen_decimal_point {
            start -= 1;
        }

        self.skip_digits();

        if !seen_decimal_point && self.ch == Some('.') {
            self.next();
            seen_decimal_point = true;
            self.skip_digits();
        }

        let token = if seen_decimal_point {
            Token::Float
        } else {
            Token::Integer
        };

        (token, self.literal(start))
    }

    fn skip_digits(&mut self) {
        while self.ch.is_some_and(is_digit) {
            self.next();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
            self.next();
        }
    }

    fn switch2(&mut self, tok0: Token, tok1: Token) -> Token {
        if self.ch == Some('=') {
            self.next();
            return tok1;
        }
        tok0
    }

    fn switch3(&mut self, tok0: Token, tok1: Token, tok2: Token) -> Token {
        match self.ch {
            Some('=') => {
                self.next();
                tok1
            }
            Some('>') => {
                self.next();
                tok2
            }
            _ => tok0,
        }
    }

    /// Source text from `start` up to the current character.
    fn literal(&self, start: usize) -> Cow<'a, str> {
        let src = self.src;
        String::from_utf8_lossy(&src[start..self.offset])
    }

    /// Reads the next character into `ch`.
    fn next(&mut self) {
        self.ch_reported = false;

        if self.rd_offset >= self.src.len() {
            self.offset = self.src.len();
            self.ch = None;
            return;
        }

        self.offset = self.rd_offset;

        let (ch, width) = match self.src[self.rd_offset] {
            byte if byte.is_ascii() => (char::from(byte), 1),
            _ => decode_rune(&self.src[self.rd_offset..]),
        };

        let offset = self.offset;
        let error: Option<Error> = match (ch, width) {
            ('\0', _) => Some(IllegalNul { offset }.into()),
            (char::REPLACEMENT_CHARACTER, 1) => Some(IllegalEncoding { offset }.into()),
            (BOM, _) if offset > 0 => Some(IllegalByteOrderMark { offset }.into()),
            _ => None,
        };
        if let Some(error) = error {
            self.error(error);
            self.ch_reported = true;
        }

        self.rd_offset += width;
        self.ch = Some(ch);
    }

    fn error(&mut self, error: Error) {
        tracing::trace!(offset = error.offset(), %error, "lexical error");

        self.handler.receive(error);
        self.error_count += 1;
    }
}

/// Decodes the UTF-8 sequence at the start of `bytes`.
///
/// Invalid sequences decode to U+FFFD with a width of one byte.
fn decode_rune(bytes: &[u8]) -> (char, usize) {
    let head = &bytes[..bytes.len().min(4)];
    let decoded = match std::str::from_utf8(head) {
        Ok(text) => text.chars().next(),
        Err(err) => std::str::from_utf8(&head[..err.valid_up_to()])
            .ok()
            .and_then(|text| text.chars().next()),
    };

    decoded.map_or((char::REPLACEMENT_CHARACTER, 1), |ch| (ch, ch.len_utf8()))
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || (!ch.is_ascii() && ch.is_alphabetic())
}

/// Decimal digits only (category Nd); `½` or `Ⅻ` are not digits.
fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
        || (!ch.is_ascii() && get_general_category(ch) == GeneralCategory::DecimalNumber)
}
