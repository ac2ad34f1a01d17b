//! The parsed script and its derived catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::stmt::{Index, Sequence, Statement, Synonym};
use super::table::Table;

/// An ordered sequence of top-level statements.
///
/// Statement order is emission order. The per-kind lookups are derived on
/// demand through [`Script::catalog`] rather than stored, so the optimizer
/// can rebuild the statement list without keeping side maps in sync.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Script {
    pub statements: Vec<Statement>,
}

/// Positions of statements in a [`Script`], grouped by kind.
///
/// Name keys are lowercased; lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tables: HashMap<String, usize>,
    pub indexes: HashMap<String, usize>,
    pub sequences: HashMap<String, usize>,
    pub synonyms: Vec<usize>,
    /// Alters, drops, comments, inserts, commits and includes.
    pub extra: Vec<usize>,
}

impl Catalog {
    pub fn table(&self, name: &str) -> Option<usize> {
        self.tables.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.indexes.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn sequence(&self, name: &str) -> Option<usize> {
        self.sequences.get(&name.to_ascii_lowercase()).copied()
    }
}

impl Script {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::default();
        for (pos, stmt) in self.statements.iter().enumerate() {
            match stmt {
                Statement::Table(t) => {
                    catalog.tables.insert(t.name.to_ascii_lowercase(), pos);
                }
                Statement::Index(i) => {
                    catalog.indexes.insert(i.name.to_ascii_lowercase(), pos);
                }
                Statement::Sequence(s) => {
                    catalog.sequences.insert(s.name.to_ascii_lowercase(), pos);
                }
                Statement::Synonym(_) => catalog.synonyms.push(pos),
                _ => catalog.extra.push(pos),
            }
        }
        catalog
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn indexes(&self) -> impl Iterator<Item = &Index> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Index(i) => Some(i),
            _ => None,
        })
    }

    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Sequence(q) => Some(q),
            _ => None,
        })
    }

    pub fn synonyms(&self) -> impl Iterator<Item = &Synonym> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Synonym(y) => Some(y),
            _ => None,
        })
    }

    /// Look up a table by name, ignoring case.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes().find(|i| i.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::stmt::{DropObject, DropStmt};

    fn sample() -> Script {
        Script::new(vec![
            Statement::Table(Table::new("Accounts")),
            Statement::Synonym(Synonym {
                synonym: "acc".into(),
                referenced: Some("Accounts".into()),
            }),
            Statement::Index(Index {
                name: "acc_idx".into(),
                table: "accounts".into(),
                columns: vec!["id".into()],
                unique: false,
                modifiers: vec![],
            }),
            Statement::Drop(DropStmt {
                object: DropObject::Table,
                name: "old".into(),
            }),
            Statement::Commit,
        ])
    }

    #[test]
    fn test_catalog_groups_by_kind() {
        let script = sample();
        let catalog = script.catalog();
        assert_eq!(catalog.table("ACCOUNTS"), Some(0));
        assert_eq!(catalog.index("acc_idx"), Some(2));
        assert_eq!(catalog.sequence("nope"), None);
        assert_eq!(catalog.synonyms, vec![1]);
        assert_eq!(catalog.extra, vec![3, 4]);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let script = sample();
        assert!(script.table("accounts").is_some());
        assert!(script.index("ACC_IDX").is_some());
    }
}
