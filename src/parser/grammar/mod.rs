//! Recursive-descent grammar over the token vector.
//!
//! ```text
//! script     := statement+
//! statement  := CREATE [OR REPLACE] created
//!             | ALTER TABLE name alter_action ;
//!             | ALTER INDEX name imod+ ;
//!             | DROP object name ;
//!             | COMMENT ON (TABLE | COLUMN) name IS string ;
//!             | INSERT INTO name [( names )] VALUES ( values ) ;
//!             | COMMIT ;
//!             | include
//! created    := [GLOBAL] [TEMPORARY] TABLE name ( tdef, ... ) tmod* ;
//!             | [UNIQUE] INDEX name ON name ( names ) imod* ;
//!             | SEQUENCE name seqmod* ;
//!             | SYNONYM name [FOR name] ;
//! ```

mod expr;
mod table;

use tracing::debug;

use super::snippet;
use super::tokens::{Keyword, Token, TokenKind};
use crate::ast::*;
use crate::error::{ChameleonError, ChameleonResult};

/// Cursor over a token vector.
pub struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// `text` is the source the tokens were lexed from; it is only used
    /// to locate errors.
    pub fn new(text: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            text,
            tokens,
            pos: 0,
        }
    }

    // ---------- cursor ----------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn at(&self, kw: Keyword) -> bool {
        self.peek().is_some_and(|t| t.is(kw))
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn next(&mut self, expected: &str) -> ChameleonResult<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ChameleonError::eof(expected))?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, kw: Keyword) -> bool {
        if self.at(kw) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.at_kind(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kw: Keyword) -> ChameleonResult<Token> {
        let token = self.next(kw.as_str())?;
        if token.is(kw) {
            Ok(token)
        } else {
            Err(self.unexpected(&token))
        }
    }

    fn expect_kind(&mut self, kind: TokenKind) -> ChameleonResult<Token> {
        let token = self.next(&kind.to_string())?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(&token))
        }
    }

    fn semicolon(&mut self) -> ChameleonResult<()> {
        self.expect_kind(TokenKind::Semicolon).map(|_| ())
    }

    /// An identifier, or a keyword usable as one.
    fn name(&mut self) -> ChameleonResult<String> {
        let token = self.next("IDENTIFIER")?;
        if token.is_name() {
            Ok(token.value)
        } else {
            Err(self.unexpected(&token))
        }
    }

    /// `( name, name, ... )`
    fn name_list(&mut self) -> ChameleonResult<Vec<String>> {
        self.expect_kind(TokenKind::LParen)?;
        let mut names = vec![self.name()?];
        while self.eat_kind(TokenKind::Comma) {
            names.push(self.name()?);
        }
        self.expect_kind(TokenKind::RParen)?;
        Ok(names)
    }

    /// A quoted string, returned without its quotes.
    /// A quoted string's text, with `''` in single quotes unescaped.
    fn string(&mut self) -> ChameleonResult<String> {
        let token = self.next("string")?;
        let v = &token.value;
        match token.kind {
            TokenKind::SQuoted => Ok(v[1..v.len() - 1].replace("''", "'")),
            TokenKind::DQuoted => Ok(v[1..v.len() - 1].to_string()),
            _ => Err(self.unexpected(&token)),
        }
    }

    fn unexpected(&self, token: &Token) -> ChameleonError {
        ChameleonError::syntax(
            token.line,
            snippet::column(self.text, token.offset),
            token.kind.to_string(),
            token.value.clone(),
            snippet::snippet(self.text, token.offset),
        )
    }

    // ---------- statements ----------

    pub fn script(&mut self) -> ChameleonResult<Script> {
        let mut statements = Vec::new();
        while self.peek().is_some() {
            let stmt = self.statement()?;
            debug!(kind = %stmt.kind(), "parsed statement");
            statements.push(stmt);
        }
        Ok(Script::new(statements))
    }

    fn statement(&mut self) -> ChameleonResult<Statement> {
        let token = self.next("statement")?;
        match token.kind {
            TokenKind::Include => Ok(Statement::Include(Include { path: token.value })),
            TokenKind::Keyword(Keyword::Create) => {
                if self.eat(Keyword::Or) {
                    self.expect(Keyword::Replace)?;
                }
                self.created()
            }
            TokenKind::Keyword(Keyword::Alter) => {
                if self.eat(Keyword::Index) {
                    self.alter_index()
                } else {
                    self.expect(Keyword::Table)?;
                    self.alter_table()
                }
            }
            TokenKind::Keyword(Keyword::Drop) => {
                let drop = self.drop()?;
                self.semicolon()?;
                Ok(Statement::Drop(drop))
            }
            TokenKind::Keyword(Keyword::Comment) => self.comment(),
            TokenKind::Keyword(Keyword::Insert) => self.insert(),
            TokenKind::Keyword(Keyword::Commit) => {
                self.semicolon()?;
                Ok(Statement::Commit)
            }
            _ => Err(self.unexpected(&token)),
        }
    }

    fn created(&mut self) -> ChameleonResult<Statement> {
        let token = self.next("TABLE, INDEX, SEQUENCE or SYNONYM")?;
        match token.keyword() {
            Some(Keyword::Global) => {
                self.eat(Keyword::Temporary);
                self.expect(Keyword::Table)?;
                self.table(true, true).map(Statement::Table)
            }
            Some(Keyword::Temporary) => {
                self.expect(Keyword::Table)?;
                self.table(false, true).map(Statement::Table)
            }
            Some(Keyword::Table) => self.table(false, false).map(Statement::Table),
            Some(Keyword::Unique) => {
                self.expect(Keyword::Index)?;
                self.index(true).map(Statement::Index)
            }
            Some(Keyword::Index) => self.index(false).map(Statement::Index),
            Some(Keyword::Sequence) => self.sequence().map(Statement::Sequence),
            Some(Keyword::Synonym) => self.synonym().map(Statement::Synonym),
            _ => Err(self.unexpected(&token)),
        }
    }

    fn index(&mut self, unique: bool) -> ChameleonResult<Index> {
        let name = self.name()?;
        self.expect(Keyword::On)?;
        let table = self.name()?;
        let columns = self.name_list()?;
        let modifiers = self.index_modifiers()?;
        self.semicolon()?;
        Ok(Index {
            name,
            table,
            columns,
            unique,
            modifiers,
        })
    }

    fn sequence(&mut self) -> ChameleonResult<Sequence> {
        let name = self.name()?;
        let mut options = Vec::new();
        loop {
            if self.eat(Keyword::Start) {
                self.expect(Keyword::With)?;
                let start = self.expect_kind(TokenKind::Digits)?;
                options.push(SequenceOption::StartWith(start.value));
            } else if self.eat(Keyword::Order) {
                options.push(SequenceOption::Order);
            } else {
                break;
            }
        }
        self.semicolon()?;
        Ok(Sequence { name, options })
    }

    fn synonym(&mut self) -> ChameleonResult<Synonym> {
        let synonym = self.name()?;
        let referenced = if self.eat(Keyword::For) {
            Some(self.name()?)
        } else {
            None
        };
        self.semicolon()?;
        Ok(Synonym {
            synonym,
            referenced,
        })
    }

    fn alter_table(&mut self) -> ChameleonResult<Statement> {
        let mut alter = AlterTable::new(self.name()?);
        if self.eat(Keyword::Add) {
            alter.adds = self.additions()?;
            // `ADD a, ADD b`
            while self.at_kind(TokenKind::Comma)
                && self.peek_at(1).is_some_and(|t| t.is(Keyword::Add))
            {
                self.pos += 2;
                alter.adds.extend(self.additions()?);
            }
        } else if self.eat(Keyword::Drop) {
            alter.drops.push(self.drop()?);
        } else if self.eat(Keyword::Rename) {
            let rename = if self.eat(Keyword::Column) {
                let name = self.name()?;
                self.expect(Keyword::To)?;
                Rename::Column {
                    name,
                    new_name: self.name()?,
                }
            } else {
                self.expect(Keyword::To)?;
                Rename::Table {
                    new_name: self.name()?,
                }
            };
            alter.mods.push(Modification::Rename(rename));
        } else if self.eat(Keyword::Modify) {
            let columns = if self.eat_kind(TokenKind::LParen) {
                let mut columns = vec![self.column()?];
                while self.eat_kind(TokenKind::Comma) {
                    columns.push(self.column()?);
                }
                self.expect_kind(TokenKind::RParen)?;
                columns
            } else {
                vec![self.column()?]
            };
            alter.mods.push(Modification::Modify(Modify { columns }));
        } else {
            let modifiers = self.table_modifiers()?;
            if modifiers.is_empty() {
                let token = self.next("ADD, DROP, RENAME, MODIFY or a table option")?;
                return Err(self.unexpected(&token));
            }
            alter
                .mods
                .extend(modifiers.into_iter().map(Modification::Modifier));
        }
        self.semicolon()?;
        Ok(Statement::AlterTable(alter))
    }

    /// `ADD tdef | ADD tmod | ADD ( tdef, ... ) | ADD ( tmod ... )`
    fn additions(&mut self) -> ChameleonResult<Vec<Addition>> {
        let parenthesized = self.eat_kind(TokenKind::LParen);
        let adds = if self.at_table_modifier() {
            self.table_modifiers()?
                .into_iter()
                .map(Addition::Modifier)
                .collect()
        } else if parenthesized {
            let mut adds = vec![self.addition()?];
            while self.eat_kind(TokenKind::Comma) {
                adds.push(self.addition()?);
            }
            adds
        } else {
            vec![self.addition()?]
        };
        if parenthesized {
            self.expect_kind(TokenKind::RParen)?;
        }
        Ok(adds)
    }

    fn addition(&mut self) -> ChameleonResult<Addition> {
        // `ADD COLUMN x ...` names the column after the keyword; a column
        // literally called "column" is followed by its type instead.
        if self.at(Keyword::Column)
            && self
                .peek_at(1)
                .is_some_and(|t| t.is_name() && !Self::starts_column_modifier(t))
        {
            self.pos += 1;
        }
        Ok(match self.table_element()? {
            table::Element::Column(c) => Addition::Column(c),
            table::Element::Constraint(c) => Addition::Constraint(c),
        })
    }

    fn alter_index(&mut self) -> ChameleonResult<Statement> {
        let index = self.name()?;
        let modifiers = self.index_modifiers()?;
        if modifiers.is_empty() {
            let token = self.next("TABLESPACE, LOGGING or PARALLEL")?;
            return Err(self.unexpected(&token));
        }
        self.semicolon()?;
        Ok(Statement::AlterIndex(AlterIndex { index, modifiers }))
    }

    /// `<object> name`, without the terminator.
    fn drop(&mut self) -> ChameleonResult<DropStmt> {
        let token = self.next("TABLE, INDEX, COLUMN, CONSTRAINT, SEQUENCE or SYNONYM")?;
        let object = match token.keyword() {
            Some(Keyword::Table) => DropObject::Table,
            Some(Keyword::Index) => DropObject::Index,
            Some(Keyword::Column) => DropObject::Column,
            Some(Keyword::Constraint) => DropObject::Constraint,
            Some(Keyword::Sequence) => DropObject::Sequence,
            Some(Keyword::Synonym) => DropObject::Synonym,
            _ => return Err(self.unexpected(&token)),
        };
        Ok(DropStmt {
            object,
            name: self.name()?,
        })
    }

    fn comment(&mut self) -> ChameleonResult<Statement> {
        self.expect(Keyword::On)?;
        let token = self.next("TABLE or COLUMN")?;
        if !token.is(Keyword::Table) && !token.is(Keyword::Column) {
            return Err(self.unexpected(&token));
        }
        let target = self.name()?;
        self.expect(Keyword::Is)?;
        let text = self.string()?;
        self.semicolon()?;
        let comment = match target.split_once('.') {
            Some((table, column)) => Comment::Column {
                table: table.to_string(),
                column: column.to_string(),
                text,
            },
            None => Comment::Table {
                table: target,
                text,
            },
        };
        Ok(Statement::Comment(comment))
    }

    fn insert(&mut self) -> ChameleonResult<Statement> {
        self.expect(Keyword::Into)?;
        let table = self.name()?;
        let columns = if self.at_kind(TokenKind::LParen) {
            self.name_list()?
        } else {
            Vec::new()
        };
        self.expect(Keyword::Values)?;
        self.expect_kind(TokenKind::LParen)?;
        let mut values = vec![self.value()?];
        while self.eat_kind(TokenKind::Comma) {
            values.push(self.value()?);
        }
        self.expect_kind(TokenKind::RParen)?;
        self.semicolon()?;
        Ok(Statement::Insert(Insert {
            table,
            columns,
            values,
        }))
    }
}
