//! The lexical module is responsible for converting raw bytes into a stream of tokens.

pub mod scanner;

pub mod token;

pub mod token_stream;

pub mod error;
pub use error::Error;
