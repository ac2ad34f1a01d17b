//! Table, column and modifier nodes.

use serde::{Deserialize, Serialize};

use super::constraint::{CheckClause, Constraint, ForeignKeyClause, KeyClause, Named};
use super::expr::Term;
use super::kind::NodeKind;

/// Storage and behaviour options attached to tables, indexes and key constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// `TABLESPACE name` (the name may be a `[[macro]]` placeholder)
    Tablespace(String),
    /// `USING INDEX TABLESPACE name`
    IndexTablespace(String),
    /// `LOGGING` / `NOLOGGING`
    Logging(bool),
    /// `PARALLEL [n]` / `NOPARALLEL`
    Parallel {
        enabled: bool,
        degree: Option<String>,
    },
    /// `ENABLE ROW MOVEMENT`
    RowMovement(bool),
    /// `ON COMMIT PRESERVE ROWS` / `ON COMMIT DELETE ROWS`
    OnCommit { preserve: bool },
}

impl Modifier {
    pub fn kind(&self) -> NodeKind {
        match self {
            Modifier::Tablespace(_) => NodeKind::Tablespace,
            Modifier::IndexTablespace(_) => NodeKind::IndexTablespace,
            Modifier::Logging(_) => NodeKind::Logging,
            Modifier::Parallel { .. } => NodeKind::Parallel,
            Modifier::RowMovement(_) => NodeKind::RowMovement,
            Modifier::OnCommit { .. } => NodeKind::OnCommit,
        }
    }
}

/// A column type: logical name plus the precision exactly as written (`10`, `10,2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    pub name: String,
    pub precision: Option<String>,
}

impl DataType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            precision: None,
        }
    }

    pub fn with_precision(name: impl Into<String>, precision: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            precision: Some(precision.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotNull {
    pub name: Option<String>,
}

impl Named for NotNull {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Everything that can follow a column name in a column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnModifier {
    Type(DataType),
    Default(Term),
    NotNull(NotNull),
    PrimaryKey(KeyClause),
    Unique(KeyClause),
    ForeignKey(ForeignKeyClause),
    Check(CheckClause),
}

impl ColumnModifier {
    pub fn kind(&self) -> NodeKind {
        match self {
            ColumnModifier::Type(_) => NodeKind::DataType,
            ColumnModifier::Default(_) => NodeKind::Default,
            ColumnModifier::NotNull(_) => NodeKind::NotNull,
            ColumnModifier::PrimaryKey(_) => NodeKind::PkMod,
            ColumnModifier::Unique(_) => NodeKind::UniqueMod,
            ColumnModifier::ForeignKey(_) => NodeKind::FkMod,
            ColumnModifier::Check(_) => NodeKind::CkMod,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self, ColumnModifier::PrimaryKey(_))
    }

    /// Position in [`NodeKind::COLUMN_MODIFIERS`], the order columns are
    /// written in.
    pub fn rank(&self) -> usize {
        let kind = self.kind();
        NodeKind::COLUMN_MODIFIERS
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(NodeKind::COLUMN_MODIFIERS.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Name of the owning table. Empty until the column is attached to one.
    pub table: String,
    pub modifiers: Vec<ColumnModifier>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: String::new(),
            modifiers: Vec::new(),
        }
    }

    /// Modifiers are stored in canonical order (stable by [`ColumnModifier::rank`]),
    /// so a rendered column parses back to the same value.
    pub fn with_modifiers(name: impl Into<String>, mut modifiers: Vec<ColumnModifier>) -> Self {
        modifiers.sort_by_key(ColumnModifier::rank);
        Self {
            name: name.into(),
            table: String::new(),
            modifiers,
        }
    }

    pub fn data_type(&self) -> Option<&DataType> {
        self.modifiers.iter().find_map(|m| match m {
            ColumnModifier::Type(t) => Some(t),
            _ => None,
        })
    }

    /// Foreign keys declared on this column.
    pub fn references(&self) -> impl Iterator<Item = &ForeignKeyClause> {
        self.modifiers.iter().filter_map(|m| match m {
            ColumnModifier::ForeignKey(fk) => Some(fk),
            _ => None,
        })
    }

    pub fn has_primary_key(&self) -> bool {
        self.modifiers.iter().any(ColumnModifier::is_primary_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub global: bool,
    pub temporary: bool,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub modifiers: Vec<Modifier>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach a column, pointing its back-reference at this table.
    pub fn add_column(&mut self, mut column: Column) {
        column.table = self.name.clone();
        self.columns.push(column);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_column_sets_back_reference() {
        let mut table = Table::new("accounts");
        table.add_column(Column::new("id"));
        assert_eq!(table.columns[0].table, "accounts");
        assert!(table.column("ID").is_some());
    }

    #[test]
    fn test_column_helpers() {
        let column = Column::with_modifiers(
            "id",
            vec![
                ColumnModifier::Type(DataType::with_precision("NUMBER", "10")),
                ColumnModifier::PrimaryKey(KeyClause::default()),
            ],
        );
        assert_eq!(column.data_type().map(|t| t.name.as_str()), Some("NUMBER"));
        assert!(column.has_primary_key());
        assert_eq!(column.references().count(), 0);
    }
}
