//! The lean dialect: storage options and synonyms render as nothing,
//! includes use `\i`, and foreign keys honor the `deferrable` option.

use std::collections::HashMap;

use super::{base_handlers, empty, requoted};
use crate::ast::*;
use crate::error::ChameleonResult;
use crate::transpiler::dialect::DdlDialect;
use crate::transpiler::{Handler, Node, Renderer};

pub struct PostgresDialect;

impl DdlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn handlers(&self) -> HashMap<NodeKind, Handler> {
        let mut h = base_handlers();
        for kind in [
            NodeKind::Tablespace,
            NodeKind::IndexTablespace,
            NodeKind::Logging,
            NodeKind::Parallel,
            NodeKind::RowMovement,
            NodeKind::Synonym,
            NodeKind::Order,
        ] {
            h.insert(kind, empty);
        }
        h.insert(NodeKind::Include, include);
        h.insert(NodeKind::Drop, drop_stmt);
        h
    }

    fn translate_type(&self, t: &DataType) -> DataType {
        match t.name.to_ascii_uppercase().as_str() {
            "VARCHAR2" => match &t.precision {
                Some(p) => DataType::with_precision("VARCHAR", p.as_str()),
                None => DataType::new("TEXT"),
            },
            "DATE" => DataType::new("TIMESTAMPTZ"),
            "BLOB" => DataType::new("BYTEA"),
            "CLOB" => DataType::new("TEXT"),
            "NUMBER" => number(t.precision.as_deref()),
            _ => t.clone(),
        }
    }

    fn translate_literal(&self, literal: &str) -> String {
        if let Some(quoted) = requoted(literal) {
            return quoted;
        }
        let lower = literal.to_ascii_lowercase();
        if let Some(sequence) = lower.strip_suffix(".nextval") {
            return format!("nextval('{}')", &literal[..sequence.len()]);
        }
        match lower.as_str() {
            "sysdate" => "CURRENT_TIMESTAMP".to_string(),
            _ => literal.to_string(),
        }
    }

    fn honors_deferrable(&self) -> bool {
        true
    }
}

/// Integer widths by declared digit count; scaled or oversized numbers stay numeric.
fn number(precision: Option<&str>) -> DataType {
    let Some(precision) = precision else {
        return DataType::new("NUMERIC");
    };
    match precision.trim().parse::<u32>() {
        Ok(1..=5) => DataType::new("SMALLINT"),
        Ok(6..=10) => DataType::new("INTEGER"),
        Ok(11..=19) => DataType::new("BIGINT"),
        _ => DataType::with_precision("NUMERIC", precision),
    }
}

/// There are no synonyms to drop.
fn drop_stmt(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    match node {
        Node::Drop(DropStmt {
            object: DropObject::Synonym,
            ..
        }) => Ok(String::new()),
        _ => super::drop_stmt(r, node, n),
    }
}

fn include(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Include(include) = node else {
        return Err(node.mismatch(NodeKind::Include));
    };
    Ok(format!("\\i {}", include.path))
}
