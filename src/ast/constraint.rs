//! Constraint nodes.
//!
//! Every constraint comes in two shapes: the table-level [`Constraint`]
//! with an explicit column list, and a column-level sibling (a
//! [`ColumnModifier`](super::ColumnModifier) variant) that applies to its
//! owning column. The shared fields live in the `*Clause` structs so the
//! optimizer can move a clause between the two shapes without copying
//! field by field.

use serde::{Deserialize, Serialize};

use super::expr::Expression;
use super::kind::NodeKind;
use super::table::Modifier;

/// Anything that may carry a constraint name.
pub trait Named {
    fn name(&self) -> Option<&str>;

    fn is_named(&self) -> bool {
        self.name().is_some()
    }

    fn is_anonymous(&self) -> bool {
        !self.is_named()
    }
}

/// Shared shape of primary-key and unique constraints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyClause {
    pub name: Option<String>,
    /// `USING INDEX TABLESPACE`, plus anything migrated from a redundant index.
    pub modifiers: Vec<Modifier>,
}

impl KeyClause {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            modifiers: Vec::new(),
        }
    }
}

impl Named for KeyClause {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// `REFERENCES table (columns)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

impl OnDelete {
    pub fn kind(&self) -> NodeKind {
        match self {
            OnDelete::Cascade => NodeKind::OnDeleteCascade,
            OnDelete::SetNull => NodeKind::OnDeleteSetNull,
        }
    }
}

/// Shared shape of foreign-key constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyClause {
    pub name: Option<String>,
    pub target: Reference,
    pub on_delete: Option<OnDelete>,
    pub deferrable: bool,
}

impl Named for ForeignKeyClause {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckClause {
    pub name: Option<String>,
    pub expression: Expression,
}

impl Named for CheckClause {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    PrimaryKey {
        key: KeyClause,
        columns: Vec<String>,
    },
    Unique {
        key: KeyClause,
        columns: Vec<String>,
    },
    ForeignKey {
        fk: ForeignKeyClause,
        columns: Vec<String>,
    },
    Check(CheckClause),
}

impl Constraint {
    pub fn kind(&self) -> NodeKind {
        match self {
            Constraint::PrimaryKey { .. } => NodeKind::PrimaryKey,
            Constraint::Unique { .. } => NodeKind::Unique,
            Constraint::ForeignKey { .. } => NodeKind::ForeignKey,
            Constraint::Check(_) => NodeKind::Check,
        }
    }

    /// The local columns this constraint covers. Checks have none.
    pub fn columns(&self) -> &[String] {
        match self {
            Constraint::PrimaryKey { columns, .. }
            | Constraint::Unique { columns, .. }
            | Constraint::ForeignKey { columns, .. } => columns,
            Constraint::Check(_) => &[],
        }
    }
}

impl Named for Constraint {
    fn name(&self) -> Option<&str> {
        match self {
            Constraint::PrimaryKey { key, .. } | Constraint::Unique { key, .. } => key.name(),
            Constraint::ForeignKey { fk, .. } => fk.name(),
            Constraint::Check(ck) => ck.name(),
        }
    }
}
