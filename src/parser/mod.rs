//! DDL parser.
//!
//! Lexing is lazy and forgiving: characters no token rule accepts are
//! logged and skipped. The grammar is strict: the first token it cannot
//! reduce aborts the parse with a [`ChameleonError::Syntax`].
//!
//! ```
//! use chameleon::parser::parse;
//!
//! let script = parse("CREATE TABLE t (id NUMBER(10) NOT NULL);").unwrap();
//! assert_eq!(script.len(), 1);
//! ```

pub mod grammar;
pub mod lexer;
pub mod snippet;
pub mod tokens;


use tracing::debug;

use crate::ast::Script;
#[cfg(doc)]
use crate::error::ChameleonError;
use crate::error::{ChameleonResult, LexError};

pub use grammar::Parser;
pub use lexer::{tokenize, Lexer};
pub use tokens::{Keyword, Token, TokenKind};

/// Parse a complete script.
pub fn parse(text: &str) -> ChameleonResult<Script> {
    parse_with_diagnostics(text).map(|(script, _)| script)
}

/// Parse a complete script, also returning the characters the lexer skipped.
pub fn parse_with_diagnostics(text: &str) -> ChameleonResult<(Script, Vec<LexError>)> {
    let (tokens, errors) = tokenize(text);
    debug!(tokens = tokens.len(), skipped = errors.len(), "tokenized");
    let script = Parser::new(text, tokens).script()?;
    Ok((script, errors))
}
