//! Contains the [`Token`] enumeration, the [`Keywords`] table and operator precedence.

use std::{borrow::Cow, collections::HashMap, fmt::Display};

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, FromRepr};

/// Precedence of every token that is not a binary operator.
pub const LOWEST_PRECEDENCE: u8 = 0;

/// Precedence reserved for unary operators, above all binary levels.
pub const UNARY_PRECEDENCE: u8 = 6;

/// Catch-all precedence for selectors, indexing and other delimiters.
pub const HIGHEST_PRECEDENCE: u8 = 7;

/// Is an enumeration containing all kinds of tokens of the rule language.
///
/// The variants are laid out in three contiguous bands (special, literal and
/// operator), with the keywords forming the tail of the operator band. The
/// classification predicates rely on this order, so new variants must be
/// inserted inside the band they belong to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Token {
    // special tokens
    /// An unknown or malformed character.
    Illegal,
    /// End of the input buffer.
    Eof,
    /// Reserved, never produced by the scanner.
    Comment,

    // literals
    /// `main`
    Identifier,
    /// `12345`
    Integer,
    /// `123.45`
    Float,

    // operators and delimiters
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Quo,
    /// `=`
    Eql,
    /// `<`
    Lss,
    /// `>`
    Gtr,
    /// `:=`
    Assign,
    /// `<>`
    Neq,
    /// `<=`
    Leq,
    /// `>=`
    Geq,
    /// `(`
    LParen,
    /// `[`
    LBrack,
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `)`
    RParen,
    /// `]`
    RBrack,
    /// `;`
    Semicolon,
    /// `:`
    Colon,

    // keywords
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `NOT`
    Not,
    /// `XABOVE`, the left operand crosses above the right one.
    XAbove,
    /// `GOINGUP`
    GoingUp,
    /// `TURNSUP`
    TurnsUp,
    /// `WHEN`
    When,
    /// `XBELOW`, the left operand crosses below the right one.
    XBelow,
    /// `GOINGDOWN`
    GoingDown,
    /// `TURNSDOWN`
    TurnsDown,
    /// `IF`
    If,
}

const LITERAL_BEGIN: u8 = Token::Identifier as u8;
const LITERAL_END: u8 = Token::Float as u8;
const OPERATOR_BEGIN: u8 = Token::Add as u8;
const OPERATOR_END: u8 = Token::If as u8;
const KEYWORD_BEGIN: u8 = Token::And as u8;
const KEYWORD_END: u8 = Token::If as u8;

impl Token {
    /// Gets the string representation of the token.
    ///
    /// For operators, delimiters and keywords this is the actual character
    /// sequence (`+` for [`Token::Add`]). For all other tokens it is the
    /// symbolic name of the token class (`IDENT` for [`Token::Identifier`]).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Comment => "COMMENT",
            Self::Identifier => "IDENT",
            Self::Integer => "INT",
            Self::Float => "FLOAT",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Quo => "/",
            Self::Eql => "=",
            Self::Lss => "<",
            Self::Gtr => ">",
            Self::Assign => ":=",
            Self::Neq => "<>",
            Self::Leq => "<=",
            Self::Geq => ">=",
            Self::LParen => "(",
            Self::LBrack => "[",
            Self::Comma => ",",
            Self::Period => ".",
            Self::RParen => ")",
            Self::RBrack => "]",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::XAbove => "XABOVE",
            Self::GoingUp => "GOINGUP",
            Self::TurnsUp => "TURNSUP",
            Self::When => "WHEN",
            Self::XBelow => "XBELOW",
            Self::GoingDown => "GOINGDOWN",
            Self::TurnsDown => "TURNSDOWN",
            Self::If => "IF",
        }
    }

    /// Renders a raw token discriminant.
    ///
    /// Values that do not name a token are rendered as `token(N)`.
    #[must_use]
    pub fn describe(raw: u8) -> Cow<'static, str> {
        Self::from_repr(raw).map_or_else(
            || Cow::Owned(format!("token({raw})")),
            |token| Cow::Borrowed(token.as_str()),
        )
    }

    /// Whether the token stands for a class of literals (identifiers and numbers).
    #[must_use]
    pub fn is_literal(self) -> bool {
        (LITERAL_BEGIN..=LITERAL_END).contains(&(self as u8))
    }

    /// Whether the token is an operator, a delimiter or a keyword.
    #[must_use]
    pub fn is_operator(self) -> bool {
        (OPERATOR_BEGIN..=OPERATOR_END).contains(&(self as u8))
    }

    /// Whether the token is a reserved word.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (KEYWORD_BEGIN..=KEYWORD_END).contains(&(self as u8))
    }

    /// Returns the precedence of the token as a binary operator.
    ///
    /// `OR` binds weakest, then `AND`, comparisons, additive and multiplicative
    /// operators. Tokens that are not binary operators return [`LOWEST_PRECEDENCE`].
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eql | Self::Neq | Self::Lss | Self::Leq | Self::Gtr | Self::Geq => 3,
            Self::Add | Self::Sub => 4,
            Self::Mul | Self::Quo => 5,
            _ => LOWEST_PRECEDENCE,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps the spelling of every keyword to its [`Token`].
///
/// The table is built once from the keyword band of [`Token`] and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    map: HashMap<&'static str, Token>,
}

impl Keywords {
    /// Builds the keyword table.
    #[must_use]
    pub fn new() -> Self {
        let map = Token::iter()
            .filter(|token| token.is_keyword())
            .map(|token| (token.as_str(), token))
            .collect();

        Self { map }
    }

    /// Maps an identifier to its keyword token, or [`Token::Identifier`] if it is not a keyword.
    ///
    /// The comparison is exact and case-sensitive.
    #[must_use]
    pub fn lookup(&self, ident: &str) -> Token {
        self.map.get(ident).copied().unwrap_or(Token::Identifier)
    }

    /// Number of keywords in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::new()
    }
}
