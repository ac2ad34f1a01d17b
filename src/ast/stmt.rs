//! Top-level statement nodes.

use serde::{Deserialize, Serialize};

use super::constraint::Constraint;
use super::expr::Term;
use super::kind::NodeKind;
use super::table::{Column, Modifier, Table};

/// `CREATE [UNIQUE] INDEX name ON table (columns) [modifiers];`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    /// Referenced by name; tables and indexes are keyed independently.
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceOption {
    StartWith(String),
    Order,
}

impl SequenceOption {
    pub fn kind(&self) -> NodeKind {
        match self {
            SequenceOption::StartWith(_) => NodeKind::StartWith,
            SequenceOption::Order => NodeKind::Order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    pub options: Vec<SequenceOption>,
}

/// `CREATE SYNONYM synonym [FOR referenced];`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    pub synonym: String,
    pub referenced: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropObject {
    Table,
    Index,
    Column,
    Constraint,
    Sequence,
    Synonym,
}

impl DropObject {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropObject::Table => "TABLE",
            DropObject::Index => "INDEX",
            DropObject::Column => "COLUMN",
            DropObject::Constraint => "CONSTRAINT",
            DropObject::Sequence => "SEQUENCE",
            DropObject::Synonym => "SYNONYM",
        }
    }
}

/// `DROP <object> name` (standalone, or inside `ALTER TABLE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropStmt {
    pub object: DropObject,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rename {
    /// `RENAME TO new_name`
    Table { new_name: String },
    /// `RENAME COLUMN name TO new_name`
    Column { name: String, new_name: String },
}

/// `MODIFY (column, ...)`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modify {
    pub columns: Vec<Column>,
}

/// Something `ALTER TABLE ... ADD` introduces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Addition {
    Column(Column),
    Constraint(Constraint),
    Modifier(Modifier),
}

/// An in-place change made by `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modification {
    Rename(Rename),
    Modify(Modify),
    Modifier(Modifier),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlterTable {
    pub table: String,
    pub adds: Vec<Addition>,
    pub mods: Vec<Modification>,
    pub drops: Vec<DropStmt>,
}

impl AlterTable {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.adds.len() + self.mods.len() + self.drops.len()
    }

    /// An alter with nothing left to do does not survive optimization.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterIndex {
    pub index: String,
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comment {
    Table {
        table: String,
        text: String,
    },
    Column {
        table: String,
        column: String,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Term>,
}

/// `@path` or `\i path`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Include {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Table(Table),
    Index(Index),
    Sequence(Sequence),
    Synonym(Synonym),
    AlterTable(AlterTable),
    AlterIndex(AlterIndex),
    Drop(DropStmt),
    Comment(Comment),
    Insert(Insert),
    Commit,
    Include(Include),
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Table(_) => NodeKind::Table,
            Statement::Index(_) => NodeKind::Index,
            Statement::Sequence(_) => NodeKind::Sequence,
            Statement::Synonym(_) => NodeKind::Synonym,
            Statement::AlterTable(_) => NodeKind::AlterTable,
            Statement::AlterIndex(_) => NodeKind::AlterIndex,
            Statement::Drop(_) => NodeKind::Drop,
            Statement::Comment(Comment::Table { .. }) => NodeKind::TableComment,
            Statement::Comment(Comment::Column { .. }) => NodeKind::ColumnComment,
            Statement::Insert(_) => NodeKind::Insert,
            Statement::Commit => NodeKind::Commit,
            Statement::Include(_) => NodeKind::Include,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alter_table_len() {
        let mut alter = AlterTable::new("t");
        assert!(alter.is_empty());
        alter.drops.push(DropStmt {
            object: DropObject::Column,
            name: "c".to_string(),
        });
        alter
            .mods
            .push(Modification::Modifier(Modifier::Logging(false)));
        assert_eq!(alter.len(), 2);
    }

    #[test]
    fn test_comment_kinds() {
        let table = Statement::Comment(Comment::Table {
            table: "t".into(),
            text: "x".into(),
        });
        let column = Statement::Comment(Comment::Column {
            table: "t".into(),
            column: "c".into(),
            text: "x".into(),
        });
        assert_eq!(table.kind(), NodeKind::TableComment);
        assert_eq!(column.kind(), NodeKind::ColumnComment);
    }
}
