//! Table bodies, column definitions, constraints and storage options.

use super::Parser;
use crate::ast::*;
use crate::error::ChameleonResult;
use crate::parser::tokens::{Keyword, Token, TokenKind};

/// One entry of a `CREATE TABLE` body or an `ALTER TABLE ... ADD`.
pub(super) enum Element {
    Column(Column),
    Constraint(Constraint),
}

impl Parser<'_> {
    /// `TABLE name ( tdef, ... ) tmod* ;` after the `TABLE` keyword.
    pub(super) fn table(&mut self, global: bool, temporary: bool) -> ChameleonResult<Table> {
        let mut table = Table::new(self.name()?);
        table.global = global;
        table.temporary = temporary;
        self.expect_kind(TokenKind::LParen)?;
        loop {
            match self.table_element()? {
                Element::Column(c) => table.add_column(c),
                Element::Constraint(c) => table.constraints.push(c),
            }
            if !self.eat_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect_kind(TokenKind::RParen)?;
        table.modifiers = self.table_modifiers()?;
        self.semicolon()?;
        Ok(table)
    }

    pub(super) fn table_element(&mut self) -> ChameleonResult<Element> {
        let second = self.peek_at(1).map(|t| t.kind);
        let starts_constraint = match self.peek().and_then(Token::keyword) {
            Some(Keyword::Constraint) => true,
            Some(Keyword::Primary) => second == Some(TokenKind::Keyword(Keyword::Key)),
            Some(Keyword::Foreign) => second == Some(TokenKind::Keyword(Keyword::Key)),
            Some(Keyword::Unique) | Some(Keyword::Check) => second == Some(TokenKind::LParen),
            _ => false,
        };
        if starts_constraint {
            self.table_constraint().map(Element::Constraint)
        } else {
            self.column().map(Element::Column)
        }
    }

    fn table_constraint(&mut self) -> ChameleonResult<Constraint> {
        let name = if self.eat(Keyword::Constraint) {
            Some(self.name()?)
        } else {
            None
        };
        let token = self.next("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK")?;
        match token.keyword() {
            Some(Keyword::Primary) => {
                self.expect(Keyword::Key)?;
                let columns = self.name_list()?;
                let key = self.key_clause(name)?;
                Ok(Constraint::PrimaryKey { key, columns })
            }
            Some(Keyword::Unique) => {
                let columns = self.name_list()?;
                let key = self.key_clause(name)?;
                Ok(Constraint::Unique { key, columns })
            }
            Some(Keyword::Foreign) => {
                self.expect(Keyword::Key)?;
                let columns = self.name_list()?;
                self.expect(Keyword::References)?;
                let fk = self.references(name)?;
                Ok(Constraint::ForeignKey { fk, columns })
            }
            Some(Keyword::Check) => self.check(name).map(Constraint::Check),
            _ => Err(self.unexpected(&token)),
        }
    }

    /// `name cmod+`
    pub(super) fn column(&mut self) -> ChameleonResult<Column> {
        let name = self.name()?;
        let mut modifiers = vec![self.column_modifier()?];
        while self.peek().is_some_and(Self::starts_column_modifier) {
            modifiers.push(self.column_modifier()?);
        }
        Ok(Column::with_modifiers(name, modifiers))
    }

    pub(super) fn starts_column_modifier(token: &Token) -> bool {
        match token.keyword() {
            Some(kw) if kw.is_type() => true,
            Some(
                Keyword::Not
                | Keyword::Constraint
                | Keyword::Check
                | Keyword::Primary
                | Keyword::Unique
                | Keyword::References
                | Keyword::Default,
            ) => true,
            _ => false,
        }
    }

    fn column_modifier(&mut self) -> ChameleonResult<ColumnModifier> {
        let name = if self.eat(Keyword::Constraint) {
            Some(self.name()?)
        } else {
            None
        };
        let token = self.next("column type or constraint")?;
        match token.keyword() {
            Some(kw) if kw.is_type() && name.is_none() => self.data_type(token).map(ColumnModifier::Type),
            Some(Keyword::Not) => {
                self.expect(Keyword::Null)?;
                Ok(ColumnModifier::NotNull(NotNull { name }))
            }
            Some(Keyword::Check) => self.check(name).map(ColumnModifier::Check),
            Some(Keyword::Primary) => {
                self.expect(Keyword::Key)?;
                self.key_clause(name).map(ColumnModifier::PrimaryKey)
            }
            Some(Keyword::Unique) => self.key_clause(name).map(ColumnModifier::Unique),
            Some(Keyword::References) => self.references(name).map(ColumnModifier::ForeignKey),
            Some(Keyword::Default) if name.is_none() => {
                let value = if self.eat_kind(TokenKind::LParen) {
                    let value = self.value()?;
                    self.expect_kind(TokenKind::RParen)?;
                    value
                } else {
                    self.value()?
                };
                Ok(ColumnModifier::Default(value))
            }
            _ => Err(self.unexpected(&token)),
        }
    }

    /// A type keyword with an optional `(p)` or `(p,s)`.
    fn data_type(&mut self, token: Token) -> ChameleonResult<DataType> {
        if !self.eat_kind(TokenKind::LParen) {
            return Ok(DataType::new(token.value));
        }
        let mut precision = self.expect_kind(TokenKind::Digits)?.value;
        if self.eat_kind(TokenKind::Comma) {
            precision.push(',');
            precision.push_str(&self.expect_kind(TokenKind::Digits)?.value);
        }
        self.expect_kind(TokenKind::RParen)?;
        Ok(DataType::with_precision(token.value, precision))
    }

    /// Primary-key / unique tail: an optional `USING INDEX TABLESPACE`.
    fn key_clause(&mut self, name: Option<String>) -> ChameleonResult<KeyClause> {
        let mut modifiers = Vec::new();
        if self.eat(Keyword::Using) {
            self.expect(Keyword::Index)?;
            self.expect(Keyword::Tablespace)?;
            modifiers.push(Modifier::IndexTablespace(self.tablespace_name()?));
        }
        Ok(KeyClause { name, modifiers })
    }

    /// `table ( names ) [ON DELETE CASCADE | ON DELETE SET NULL] [DEFERRABLE]`
    /// after the `REFERENCES` keyword.
    fn references(&mut self, name: Option<String>) -> ChameleonResult<ForeignKeyClause> {
        let table = self.name()?;
        let columns = self.name_list()?;
        let on_delete = if self.at(Keyword::On)
            && self.peek_at(1).is_some_and(|t| t.is(Keyword::Delete))
        {
            self.pos += 2;
            if self.eat(Keyword::Cascade) {
                Some(OnDelete::Cascade)
            } else {
                self.expect(Keyword::Set)?;
                self.expect(Keyword::Null)?;
                Some(OnDelete::SetNull)
            }
        } else {
            None
        };
        let deferrable = self.eat(Keyword::Deferrable);
        Ok(ForeignKeyClause {
            name,
            target: Reference { table, columns },
            on_delete,
            deferrable,
        })
    }

    /// `( expression )` after the `CHECK` keyword.
    fn check(&mut self, name: Option<String>) -> ChameleonResult<CheckClause> {
        self.expect_kind(TokenKind::LParen)?;
        let expression = self.expression()?;
        self.expect_kind(TokenKind::RParen)?;
        Ok(CheckClause { name, expression })
    }

    fn tablespace_name(&mut self) -> ChameleonResult<String> {
        if self.at_kind(TokenKind::Macro) {
            return Ok(self.next("MACRO")?.value);
        }
        self.name()
    }

    pub(super) fn at_table_modifier(&self) -> bool {
        let Some(token) = self.peek() else {
            return false;
        };
        match token.keyword() {
            Some(
                Keyword::Tablespace
                | Keyword::Logging
                | Keyword::Nologging
                | Keyword::Parallel
                | Keyword::Noparallel,
            ) => true,
            Some(Keyword::Enable | Keyword::Disable) => {
                self.peek_at(1).is_some_and(|t| t.is(Keyword::Row))
            }
            Some(Keyword::On) => self.peek_at(1).is_some_and(|t| t.is(Keyword::Commit)),
            _ => false,
        }
    }

    /// Zero or more table options.
    pub(super) fn table_modifiers(&mut self) -> ChameleonResult<Vec<Modifier>> {
        let mut modifiers = Vec::new();
        while self.at_table_modifier() {
            let movement = if self.eat(Keyword::Enable) {
                Some(true)
            } else if self.eat(Keyword::Disable) {
                Some(false)
            } else {
                None
            };
            if let Some(enabled) = movement {
                self.expect(Keyword::Row)?;
                self.expect(Keyword::Movement)?;
                modifiers.push(Modifier::RowMovement(enabled));
            } else if self.eat(Keyword::On) {
                self.expect(Keyword::Commit)?;
                let token = self.next("PRESERVE or DELETE")?;
                let preserve = match token.keyword() {
                    Some(Keyword::Preserve) => true,
                    Some(Keyword::Delete) => false,
                    _ => return Err(self.unexpected(&token)),
                };
                self.expect(Keyword::Rows)?;
                modifiers.push(Modifier::OnCommit { preserve });
            } else {
                modifiers.push(self.storage_modifier()?);
            }
        }
        Ok(modifiers)
    }

    /// Zero or more index options.
    pub(super) fn index_modifiers(&mut self) -> ChameleonResult<Vec<Modifier>> {
        let mut modifiers = Vec::new();
        while self.peek().and_then(Token::keyword).is_some_and(|kw| {
            matches!(
                kw,
                Keyword::Tablespace
                    | Keyword::Logging
                    | Keyword::Nologging
                    | Keyword::Parallel
                    | Keyword::Noparallel
            )
        }) {
            modifiers.push(self.storage_modifier()?);
        }
        Ok(modifiers)
    }

    /// `TABLESPACE x | [NO]LOGGING | PARALLEL [n] | NOPARALLEL`
    fn storage_modifier(&mut self) -> ChameleonResult<Modifier> {
        let token = self.next("TABLESPACE, LOGGING or PARALLEL")?;
        match token.keyword() {
            Some(Keyword::Tablespace) => Ok(Modifier::Tablespace(self.tablespace_name()?)),
            Some(Keyword::Logging) => Ok(Modifier::Logging(true)),
            Some(Keyword::Nologging) => Ok(Modifier::Logging(false)),
            Some(Keyword::Parallel) => {
                let degree = if self.at_kind(TokenKind::Digits) {
                    Some(self.next("DIGITS")?.value)
                } else {
                    None
                };
                Ok(Modifier::Parallel {
                    enabled: true,
                    degree,
                })
            }
            Some(Keyword::Noparallel) => Ok(Modifier::Parallel {
                enabled: false,
                degree: None,
            }),
            _ => Err(self.unexpected(&token)),
        }
    }
}
