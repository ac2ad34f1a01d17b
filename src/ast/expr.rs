//! Expression and value nodes.
//!
//! Expressions are not typed beyond term sequencing: a check condition such
//! as `status IN ('A', 'B')` is stored as the flat term list
//! `status`, `IN`, `(`, `'A'`, `,`, `'B'`, `)`.

use serde::{Deserialize, Serialize};

use super::kind::NodeKind;

/// A single term of an expression, or a value in `DEFAULT` / `VALUES` / call position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// Raw token text: identifier, number, operator, or quoted literal
    /// (quotes included, so the renderer can tell them apart).
    Literal(String),
    Function(Function),
    Expression(Expression),
}

impl Term {
    pub fn literal(s: impl Into<String>) -> Self {
        Term::Literal(s.into())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Term::Literal(_) => NodeKind::Literal,
            Term::Function(_) => NodeKind::Function,
            Term::Expression(_) => NodeKind::Expression,
        }
    }

    /// The literal text, if this term is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal(s) => Some(s),
            _ => None,
        }
    }
}

/// `name(arg, arg, ...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub args: Vec<Term>,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expression {
    pub terms: Vec<Term>,
}

impl Expression {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Build an expression from literal words.
    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: words.into_iter().map(|w| Term::Literal(w.into())).collect(),
        }
    }

    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// Append every term of `other`, flattening it into this expression.
    pub fn extend(&mut self, other: Expression) {
        self.terms.extend(other.terms);
    }

    /// If this is exactly `<column> IS NOT NULL`, the column name.
    pub fn not_null_column(&self) -> Option<&str> {
        match self.terms.as_slice() {
            [Term::Literal(col), Term::Literal(is), Term::Literal(not), Term::Literal(null)]
                if is.eq_ignore_ascii_case("IS")
                    && not.eq_ignore_ascii_case("NOT")
                    && null.eq_ignore_ascii_case("NULL") =>
            {
                Some(col)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_null_column() {
        let ex = Expression::words(["status", "is", "NOT", "null"]);
        assert_eq!(ex.not_null_column(), Some("status"));

        let ex = Expression::words(["status", "IS", "NULL"]);
        assert_eq!(ex.not_null_column(), None);
    }

    #[test]
    fn test_extend_flattens() {
        let mut ex = Expression::words(["a", "=", "1"]);
        ex.push(Term::literal("AND"));
        ex.extend(Expression::words(["b", "=", "2"]));
        assert_eq!(ex.terms.len(), 7);
        assert_eq!(ex.terms[4].as_literal(), Some("b"));
    }
}
