use std::path::Path;

use pretty_assertions::assert_eq;
use rulescan::{
    base::{source_file::SourceFile, CollectHandler, MemoryProvider, PrintHandler, SilentHandler},
    lexical::{
        scanner::Scanner,
        token::{Keywords, Token},
        token_stream::TokenStream,
    },
};
use strum::IntoEnumIterator;

const SOURCE: &str = include_str!("./strategy.rule");

#[test]
fn scanning_strategy() {
    let mut provider = MemoryProvider::new();
    provider.add_file("strategy.rule", SOURCE);

    let handler = SilentHandler::new();
    let stream = rulescan::tokenize(&handler, &provider, Path::new("strategy.rule"))
        .expect("Failed to tokenize");

    assert!(!stream.has_errors());
    assert!(!handler.has_received());

    let first_line = stream
        .kinds()
        .take_while(|token| *token != Token::Semicolon)
        .collect::<Vec<_>>();
    assert_eq!(
        first_line,
        vec![
            Token::Identifier,
            Token::Assign,
            Token::Identifier,
            Token::XAbove,
            Token::Identifier,
            Token::LParen,
            Token::Identifier,
            Token::Comma,
            Token::Integer,
            Token::RParen,
        ]
    );

    let numbers = stream
        .iter()
        .filter(|scanned| scanned.token == Token::Float)
        .map(|scanned| scanned.text())
        .collect::<Vec<_>>();
    assert_eq!(numbers, vec!["70.5", "0.25", ".5", "1."]);
}

#[test]
fn scanning_offsets_point_into_source() {
    let source_file = SourceFile::from_bytes("strategy.rule", SOURCE);
    let stream = TokenStream::tokenize(&source_file, &SilentHandler::new());

    let mut last = 0;
    for scanned in stream.iter() {
        assert!(scanned.offset >= last);
        last = scanned.offset;

        let text = scanned.text();
        assert_eq!(&SOURCE[scanned.offset..scanned.offset + text.len()], text);
    }

    let location = source_file
        .get_location(stream[stream.len() - 1].offset)
        .expect("offset inside the file");
    assert_eq!(location.line, 4);
}

#[test]
fn scanning_round_trip() {
    // every token that the scanner can produce from valid input
    let samples = Token::iter()
        .filter(|token| token.is_operator())
        .map(|token| (token, token.as_str().to_string()))
        .chain([
            (Token::Identifier, "sma_20".to_string()),
            (Token::Integer, "42".to_string()),
            (Token::Float, "3.14".to_string()),
            (Token::Float, ".5".to_string()),
            (Token::Float, "7.".to_string()),
        ])
        .collect::<Vec<_>>();

    let separators = [" ", "\t", "\n", "\r\n", "  \t\n\r "];
    let source = samples
        .iter()
        .zip(separators.iter().cycle())
        .map(|((_, lit), sep)| format!("{lit}{sep}"))
        .collect::<String>();

    let handler = CollectHandler::new();
    let mut scanner = Scanner::new(source.as_bytes(), &handler);
    for (token, lit) in &samples {
        let scanned = scanner.scan();
        assert_eq!(scanned.token, *token);
        assert_eq!(scanned.text(), lit);
    }

    let end = scanner.scan();
    assert_eq!(end.token, Token::Eof);
    assert_eq!(end.offset, source.len());
    assert_eq!(scanner.error_count(), 0);
    assert!(handler.is_empty());
}

#[test]
fn scanning_reports_errors_and_continues() {
    let source_file = SourceFile::from_bytes("broken.rule", b"x := 1 # 2\n\xfe y \xef\xbb\xbf".to_vec());
    let handler = PrintHandler::with_source(source_file.clone());
    let stream = TokenStream::tokenize(&source_file, &handler);

    assert!(handler.has_printed());
    assert_eq!(stream.error_count(), 3);
    assert_eq!(
        stream.kinds().collect::<Vec<_>>(),
        vec![
            Token::Identifier,
            Token::Assign,
            Token::Integer,
            Token::Illegal,
            Token::Integer,
            Token::Illegal,
            Token::Identifier,
            Token::Illegal,
        ]
    );
}

#[test]
fn scanning_missing_file() {
    let provider = MemoryProvider::new();
    let result = rulescan::tokenize(&SilentHandler::new(), &provider, Path::new("missing.rule"));

    assert!(matches!(result, Err(rulescan::base::Error::IoError(_))));
}

#[test]
fn keyword_lookup_is_total() {
    let keywords = Keywords::new();

    for text in ["", "IF", "if", "XABOVE", "xabove", "sma", "AND2", "<>", "größe"] {
        let token = keywords.lookup(text);
        assert!(token == Token::Identifier || token.is_keyword(), "{text}");
    }
}
