//! Expressions, values and function calls.
//!
//! ```text
//! expression := primary ((AND | OR) primary)*
//! primary    := ( expression ) [op term]
//!             | term op term
//!             | term op ( expression )
//!             | term DIGITS                  -- `x -1` folds into `x - 1`
//!             | term BETWEEN term AND term
//!             | term IN ( term, ... )
//!             | term IS [NOT] NULL
//! value      := string | DIGITS | NULL | date | function | name | expression
//! ```
//!
//! The result is always a flat term list: grouping parentheses are kept
//! as literal terms.

use super::Parser;
use crate::ast::*;
use crate::error::ChameleonResult;
use crate::parser::tokens::{Keyword, TokenKind};

impl Parser<'_> {
    pub(super) fn expression(&mut self) -> ChameleonResult<Expression> {
        let mut ex = self.primary()?;
        while self.at(Keyword::And) || self.at(Keyword::Or) {
            let conj = self.next("AND or OR")?;
            ex.push(Term::Literal(conj.value));
            ex.extend(self.primary()?);
        }
        Ok(ex)
    }

    fn primary(&mut self) -> ChameleonResult<Expression> {
        if self.eat_kind(TokenKind::LParen) {
            let mut ex = Expression::words(["("]);
            ex.extend(self.expression()?);
            self.expect_kind(TokenKind::RParen)?;
            ex.push(Term::literal(")"));
            if self.peek().is_some_and(|t| t.kind.is_operator()) {
                let op = self.next("operator")?;
                ex.push(Term::Literal(op.value));
                ex.push(self.term()?);
            }
            return Ok(ex);
        }
        let first = self.term()?;
        let mut ex = Expression::new(vec![first]);
        self.tail(&mut ex)?;
        Ok(ex)
    }

    fn at_tail(&self) -> bool {
        self.peek().is_some_and(|t| {
            t.kind.is_operator()
                || t.kind == TokenKind::Digits
                || t.is(Keyword::Between)
                || t.is(Keyword::In)
                || t.is(Keyword::Is)
        })
    }

    /// Everything that may follow the leading term of a comparison.
    fn tail(&mut self, ex: &mut Expression) -> ChameleonResult<()> {
        let token = self.next("operator")?;
        match token.kind {
            kind if kind.is_operator() => {
                ex.push(Term::Literal(token.value));
                if self.eat_kind(TokenKind::LParen) {
                    ex.push(Term::literal("("));
                    ex.extend(self.expression()?);
                    self.expect_kind(TokenKind::RParen)?;
                    ex.push(Term::literal(")"));
                } else {
                    ex.push(self.term()?);
                }
            }
            TokenKind::Digits => {
                let (sign, digits) = match token.value.strip_prefix('-') {
                    Some(digits) => ("-", digits),
                    None => ("+", token.value.as_str()),
                };
                ex.push(Term::literal(sign));
                ex.push(Term::literal(digits));
            }
            TokenKind::Keyword(Keyword::Between) => {
                ex.push(Term::Literal(token.value));
                ex.push(self.term()?);
                let and = self.expect(Keyword::And)?;
                ex.push(Term::Literal(and.value));
                ex.push(self.term()?);
            }
            TokenKind::Keyword(Keyword::In) => {
                ex.push(Term::Literal(token.value));
                self.expect_kind(TokenKind::LParen)?;
                ex.push(Term::literal("("));
                ex.push(self.term()?);
                while self.eat_kind(TokenKind::Comma) {
                    ex.push(Term::literal(","));
                    ex.push(self.term()?);
                }
                self.expect_kind(TokenKind::RParen)?;
                ex.push(Term::literal(")"));
            }
            TokenKind::Keyword(Keyword::Is) => {
                ex.push(Term::Literal(token.value));
                if self.at(Keyword::Not) {
                    ex.push(Term::Literal(self.next("NOT")?.value));
                }
                ex.push(Term::Literal(self.expect(Keyword::Null)?.value));
            }
            _ => return Err(self.unexpected(&token)),
        }
        Ok(())
    }

    /// A single operand: literal, name, date keyword or function call.
    fn term(&mut self) -> ChameleonResult<Term> {
        let token = self.next("term")?;
        match token.kind {
            TokenKind::SQuoted | TokenKind::DQuoted | TokenKind::Digits => {
                Ok(Term::Literal(token.value))
            }
            TokenKind::Keyword(kw) if kw.is_date_value() => Ok(Term::Literal(token.value)),
            _ if token.is_name() => {
                if self.at_kind(TokenKind::LParen) {
                    self.function(token.value).map(Term::Function)
                } else {
                    Ok(Term::Literal(token.value))
                }
            }
            _ => Err(self.unexpected(&token)),
        }
    }

    /// `name ( value, ... )`, positioned at the opening parenthesis.
    fn function(&mut self, name: String) -> ChameleonResult<Function> {
        self.expect_kind(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.eat_kind(TokenKind::RParen) {
            args.push(self.value()?);
            while self.eat_kind(TokenKind::Comma) {
                args.push(self.value()?);
            }
            self.expect_kind(TokenKind::RParen)?;
        }
        Ok(Function::new(name, args))
    }

    /// A value in `DEFAULT`, `VALUES` or argument position.
    pub(super) fn value(&mut self) -> ChameleonResult<Term> {
        if self.at_kind(TokenKind::LParen) {
            return self.expression().map(Term::Expression);
        }
        if self.at(Keyword::Null) {
            return Ok(Term::Literal(self.next("NULL")?.value));
        }
        let first = self.term()?;
        if !self.at_tail() {
            return Ok(first);
        }
        let mut ex = Expression::new(vec![first]);
        self.tail(&mut ex)?;
        while self.at(Keyword::And) || self.at(Keyword::Or) {
            let conj = self.next("AND or OR")?;
            ex.push(Term::Literal(conj.value));
            ex.extend(self.primary()?);
        }
        Ok(Term::Expression(ex))
    }
}
