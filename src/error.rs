//! Error types for chameleon.

use std::fmt;

use thiserror::Error;

/// The main error type for chameleon operations.
#[derive(Debug, Error)]
pub enum ChameleonError {
    /// The grammar could not reduce the token at this position.
    #[error("Syntax Error: {{{kind}}} \"{value}\" found at: {line}:{column} snip: \"{snippet}\"")]
    Syntax {
        line: usize,
        column: usize,
        kind: String,
        value: String,
        snippet: String,
    },

    /// Input ended while a construct was still open.
    #[error("EOF encountered and not expected (expected {expected})")]
    UnexpectedEof { expected: String },

    /// A node kind has no handler registered in the target dialect.
    #[error("plugin for {kind}, not-found in dialect '{dialect}'")]
    MissingHandler {
        dialect: &'static str,
        kind: &'static str,
    },

    /// A sortable node kind has no entry in the ordering table.
    #[error("factory missing ordering for {kind}")]
    MissingOrdering { kind: &'static str },

    /// A handler was registered under a kind it cannot render.
    #[error("plugin for {handler} cannot render {kind}")]
    HandlerMismatch {
        handler: &'static str,
        kind: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChameleonError {
    /// Create a syntax error for an offending token.
    pub fn syntax(
        line: usize,
        column: usize,
        kind: impl Into<String>,
        value: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            line,
            column,
            kind: kind.into(),
            value: value.into(),
            snippet: snippet.into(),
        }
    }

    /// Create an end-of-input error.
    pub fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }
}

/// Result type alias for chameleon operations.
pub type ChameleonResult<T> = Result<T, ChameleonError>;

/// An unrecognized character the lexer skipped over.
///
/// Lexical errors never abort a parse; they are collected and logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub ch: char,
    pub line: usize,
    pub column: usize,
    pub snippet: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) unexpected at: {}:{} snip: \"{}\", skipped",
            self.ch, self.line, self.column, self.snippet
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = ChameleonError::syntax(3, 7, "RPAREN", ")", "CREATE TABLE t ()");
        assert_eq!(
            err.to_string(),
            "Syntax Error: {RPAREN} \")\" found at: 3:7 snip: \"CREATE TABLE t ()\""
        );
    }

    #[test]
    fn test_lex_error_display() {
        let err = LexError {
            ch: '$',
            line: 1,
            column: 4,
            snippet: "ab $c".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "($) unexpected at: 1:4 snip: \"ab $c\", skipped"
        );
    }
}
