//! Node kind tags.
//!
//! Every node the renderer can be asked to format reports one of these
//! tags; dialect handler tables and the ordering table are keyed by them.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    // statements
    Table,
    Index,
    Sequence,
    Synonym,
    AlterTable,
    AlterIndex,
    Drop,
    TableComment,
    ColumnComment,
    Insert,
    Commit,
    Include,
    // table body
    Column,
    DataType,
    Default,
    NotNull,
    PkMod,
    UniqueMod,
    FkMod,
    CkMod,
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
    OnDeleteCascade,
    OnDeleteSetNull,
    // modifiers
    Tablespace,
    IndexTablespace,
    Logging,
    Parallel,
    RowMovement,
    OnCommit,
    StartWith,
    Order,
    // alter actions
    Rename,
    Modify,
    // values
    Expression,
    Function,
    Literal,
}

impl NodeKind {
    pub const ALL: [NodeKind; 39] = [
        NodeKind::Table,
        NodeKind::Index,
        NodeKind::Sequence,
        NodeKind::Synonym,
        NodeKind::AlterTable,
        NodeKind::AlterIndex,
        NodeKind::Drop,
        NodeKind::TableComment,
        NodeKind::ColumnComment,
        NodeKind::Insert,
        NodeKind::Commit,
        NodeKind::Include,
        NodeKind::Column,
        NodeKind::DataType,
        NodeKind::Default,
        NodeKind::NotNull,
        NodeKind::PkMod,
        NodeKind::UniqueMod,
        NodeKind::FkMod,
        NodeKind::CkMod,
        NodeKind::PrimaryKey,
        NodeKind::Unique,
        NodeKind::ForeignKey,
        NodeKind::Check,
        NodeKind::OnDeleteCascade,
        NodeKind::OnDeleteSetNull,
        NodeKind::Tablespace,
        NodeKind::IndexTablespace,
        NodeKind::Logging,
        NodeKind::Parallel,
        NodeKind::RowMovement,
        NodeKind::OnCommit,
        NodeKind::StartWith,
        NodeKind::Order,
        NodeKind::Rename,
        NodeKind::Modify,
        NodeKind::Expression,
        NodeKind::Function,
        NodeKind::Literal,
    ];

    /// Kinds that appear as top-level statements.
    pub const STATEMENTS: [NodeKind; 12] = [
        NodeKind::Table,
        NodeKind::Index,
        NodeKind::Sequence,
        NodeKind::Synonym,
        NodeKind::AlterTable,
        NodeKind::AlterIndex,
        NodeKind::Drop,
        NodeKind::TableComment,
        NodeKind::ColumnComment,
        NodeKind::Insert,
        NodeKind::Commit,
        NodeKind::Include,
    ];

    /// Kinds that appear in a column's modifier list.
    pub const COLUMN_MODIFIERS: [NodeKind; 7] = [
        NodeKind::DataType,
        NodeKind::Default,
        NodeKind::NotNull,
        NodeKind::PkMod,
        NodeKind::UniqueMod,
        NodeKind::FkMod,
        NodeKind::CkMod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Table => "Table",
            NodeKind::Index => "Index",
            NodeKind::Sequence => "Sequence",
            NodeKind::Synonym => "Synonym",
            NodeKind::AlterTable => "Alter.Table",
            NodeKind::AlterIndex => "Alter.Index",
            NodeKind::Drop => "Drop",
            NodeKind::TableComment => "TableComment",
            NodeKind::ColumnComment => "ColumnComment",
            NodeKind::Insert => "Insert",
            NodeKind::Commit => "Commit",
            NodeKind::Include => "Include",
            NodeKind::Column => "Column",
            NodeKind::DataType => "Type",
            NodeKind::Default => "Default",
            NodeKind::NotNull => "NotNull",
            NodeKind::PkMod => "PkMod",
            NodeKind::UniqueMod => "UniqueMod",
            NodeKind::FkMod => "FkMod",
            NodeKind::CkMod => "CkMod",
            NodeKind::PrimaryKey => "PK",
            NodeKind::Unique => "Unique",
            NodeKind::ForeignKey => "FK",
            NodeKind::Check => "Check",
            NodeKind::OnDeleteCascade => "FK.Cascade",
            NodeKind::OnDeleteSetNull => "FK.Setnull",
            NodeKind::Tablespace => "Tablespace",
            NodeKind::IndexTablespace => "TsMod",
            NodeKind::Logging => "Logging",
            NodeKind::Parallel => "Parallel",
            NodeKind::RowMovement => "RowMovement",
            NodeKind::OnCommit => "OnCommit",
            NodeKind::StartWith => "Sequence.StartWith",
            NodeKind::Order => "Sequence.Order",
            NodeKind::Rename => "Rename",
            NodeKind::Modify => "Modify",
            NodeKind::Expression => "Expression",
            NodeKind::Function => "Function",
            NodeKind::Literal => "Literal",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_exhaustive_and_unique() {
        let set: HashSet<_> = NodeKind::ALL.iter().collect();
        assert_eq!(set.len(), NodeKind::ALL.len());
        for k in NodeKind::STATEMENTS.iter().chain(NodeKind::COLUMN_MODIFIERS.iter()) {
            assert!(set.contains(k), "{k} missing from ALL");
        }
    }
}
