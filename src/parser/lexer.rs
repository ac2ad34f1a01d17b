//! DDL tokenizer.
//!
//! Built from nom combinators, one token at a time. Trivia (whitespace,
//! `--`/`#` line comments and `/* ... */` blocks) is skipped between tokens;
//! a block comment swallows everything up to its terminator, so quotes or
//! semicolons inside it are never seen. A character no rule accepts is
//! recorded as a [`LexError`], logged, and skipped.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while, take_while1},
    character::complete::{char, digit1, satisfy},
    combinator::{map, opt, recognize, rest, value, verify},
    multi::many0,
    sequence::{pair, preceded, tuple},
    IResult,
};
use tracing::warn;

use super::snippet;
use super::tokens::{Keyword, Token, TokenKind};
use crate::error::LexError;

/// Single-quoted literal; `''` escapes a quote.
fn squoted(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('\''),
        many0(alt((is_not("'"), tag("''")))),
        char('\''),
    )))(input)
}

fn dquoted(input: &str) -> IResult<&str, &str> {
    recognize(tuple((char('"'), take_while(|c: char| c != '"'), char('"'))))(input)
}

/// `[[...]]`, up to the first `]]` on the same line.
fn macro_placeholder(input: &str) -> IResult<&str, &str> {
    verify(
        recognize(tuple((tag("[["), take_until("]]"), tag("]]")))),
        |s: &str| !s.contains('\n'),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
    ))(input)
}

/// `@path` or `\i path`; yields the path.
fn include(input: &str) -> IResult<&str, &str> {
    preceded(
        alt((
            tag("@"),
            recognize(pair(tag("\\i"), take_while1(|c: char| c == ' ' || c == '\t'))),
        )),
        take_while1(|c: char| c != '\n'),
    )(input)
}

fn digits(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(char('-')), digit1))(input)
}

fn symbol(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Neq, tag("!=")),
        value(TokenKind::GtEq, tag(">=")),
        value(TokenKind::LtEq, tag("<=")),
        value(TokenKind::Eq, tag("=")),
        value(TokenKind::Gt, tag(">")),
        value(TokenKind::Lt, tag("<")),
        value(TokenKind::Plus, tag("+")),
        value(TokenKind::Minus, tag("-")),
        value(TokenKind::LParen, tag("(")),
        value(TokenKind::RParen, tag(")")),
        value(TokenKind::Semicolon, tag(";")),
        value(TokenKind::Comma, tag(",")),
    ))(input)
}

fn operator(input: &str) -> IResult<&str, (TokenKind, &str)> {
    let (remaining, kind) = symbol(input)?;
    Ok((remaining, (kind, &input[..input.len() - remaining.len()])))
}

fn word(input: &str) -> IResult<&str, (TokenKind, &str)> {
    map(identifier, |s| {
        let kind = Keyword::lookup(s).map_or(TokenKind::Identifier, TokenKind::Keyword);
        (kind, s)
    })(input)
}

/// One token: its kind and value.
fn token(input: &str) -> IResult<&str, (TokenKind, &str)> {
    alt((
        map(squoted, |s| (TokenKind::SQuoted, s)),
        map(dquoted, |s| (TokenKind::DQuoted, s)),
        map(macro_placeholder, |s| (TokenKind::Macro, s)),
        word,
        map(include, |s| (TokenKind::Include, s.trim())),
        map(digits, |s| (TokenKind::Digits, s)),
        operator,
    ))(input)
}

/// Whitespace, line comments and block comments.
fn trivia(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        take_while1(|c: char| c.is_whitespace()),
        recognize(pair(alt((tag("--"), tag("#"))), take_while(|c: char| c != '\n'))),
        recognize(tuple((
            tag("/*"),
            alt((take_until("*/"), rest)),
            opt(tag("*/")),
        ))),
    ))))(input)
}

/// Lazy token stream over a script.
///
/// Restart by constructing a new lexer over the same text.
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            errors: Vec::new(),
        }
    }

    /// Characters skipped so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.text[self.pos..self.pos + len];
        self.line += consumed.matches('\n').count();
        self.pos += len;
    }

    fn skip_trivia(&mut self) {
        let input = &self.text[self.pos..];
        if let Ok((remaining, _)) = trivia(input) {
            self.advance(input.len() - remaining.len());
        }
    }

    fn skip_char(&mut self, ch: char) {
        let error = LexError {
            ch,
            line: self.line,
            column: snippet::column(self.text, self.pos),
            snippet: snippet::snippet(self.text, self.pos),
        };
        warn!("{}", error);
        self.errors.push(error);
        self.advance(ch.len_utf8());
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            self.skip_trivia();
            let input = &self.text[self.pos..];
            let ch = input.chars().next()?;
            match token(input) {
                Ok((remaining, (kind, value))) => {
                    let token = Token {
                        kind,
                        value: value.to_string(),
                        line: self.line,
                        offset: self.pos,
                    };
                    self.advance(input.len() - remaining.len());
                    return Some(token);
                }
                Err(_) => self.skip_char(ch),
            }
        }
    }
}

/// Tokenize a whole script, returning the tokens and any skipped characters.
pub fn tokenize(text: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(text);
    let tokens = lexer.by_ref().collect();
    (tokens, lexer.into_errors())
}
