//! The full dialect: storage options, synonyms and `@file` includes.

use std::collections::HashMap;

use super::{base_handlers, requoted};
use crate::ast::*;
use crate::error::ChameleonResult;
use crate::transpiler::dialect::DdlDialect;
use crate::transpiler::{indent, Handler, Node, Renderer};

pub struct OracleDialect;

impl DdlDialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn handlers(&self) -> HashMap<NodeKind, Handler> {
        let mut h = base_handlers();
        h.insert(NodeKind::Tablespace, tablespace);
        h.insert(NodeKind::IndexTablespace, index_tablespace);
        h.insert(NodeKind::Logging, logging);
        h.insert(NodeKind::Parallel, parallel);
        h.insert(NodeKind::RowMovement, row_movement);
        h.insert(NodeKind::Synonym, synonym);
        h.insert(NodeKind::Function, function);
        h.insert(NodeKind::Include, include);
        h
    }

    fn translate_type(&self, t: &DataType) -> DataType {
        match t.name.to_ascii_uppercase().as_str() {
            "NUMERIC" => DataType {
                name: "NUMBER".to_string(),
                precision: t.precision.clone(),
            },
            "SMALLINT" => DataType::with_precision("NUMBER", "5"),
            "INTEGER" => DataType::with_precision("NUMBER", "10"),
            "BIGINT" => DataType::with_precision("NUMBER", "19"),
            "VARCHAR" => DataType {
                name: "VARCHAR2".to_string(),
                precision: t.precision.clone(),
            },
            "BYTEA" => DataType::new("BLOB"),
            "TEXT" => DataType::new("CLOB"),
            "TIMESTAMPTZ" => DataType::new("DATE"),
            _ => t.clone(),
        }
    }

    fn translate_literal(&self, literal: &str) -> String {
        if let Some(quoted) = requoted(literal) {
            return quoted;
        }
        match literal.to_ascii_uppercase().as_str() {
            "CURRENT_TIMESTAMP" | "CURRENT_DATE" => "SYSDATE".to_string(),
            _ => literal.to_string(),
        }
    }
}

fn tablespace(_: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Modifier(Modifier::Tablespace(name)) = node else {
        return Err(node.mismatch(NodeKind::Tablespace));
    };
    Ok(format!("\n{}TABLESPACE {}", indent(n), name))
}

fn index_tablespace(_: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Modifier(Modifier::IndexTablespace(name)) = node else {
        return Err(node.mismatch(NodeKind::IndexTablespace));
    };
    Ok(format!("\n{}USING INDEX TABLESPACE {}", indent(n), name))
}

fn logging(_: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Modifier(Modifier::Logging(enabled)) = node else {
        return Err(node.mismatch(NodeKind::Logging));
    };
    let keyword = if *enabled { "LOGGING" } else { "NOLOGGING" };
    Ok(format!("\n{}{}", indent(n), keyword))
}

fn parallel(_: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Modifier(Modifier::Parallel { enabled, degree }) = node else {
        return Err(node.mismatch(NodeKind::Parallel));
    };
    let mut s = format!("\n{}", indent(n));
    if !*enabled {
        s.push_str("NOPARALLEL");
        return Ok(s);
    }
    s.push_str("PARALLEL");
    if let Some(degree) = degree {
        s.push(' ');
        s.push_str(degree);
    }
    Ok(s)
}

fn row_movement(_: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Modifier(Modifier::RowMovement(enabled)) = node else {
        return Err(node.mismatch(NodeKind::RowMovement));
    };
    let keyword = if *enabled { "ENABLE" } else { "DISABLE" };
    Ok(format!("\n{}{} ROW MOVEMENT", indent(n), keyword))
}

fn synonym(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Synonym(syn) = node else {
        return Err(node.mismatch(NodeKind::Synonym));
    };
    Ok(match &syn.referenced {
        Some(referenced) => format!("CREATE SYNONYM {} FOR {};", syn.synonym, referenced),
        None => format!("CREATE SYNONYM {};", syn.synonym),
    })
}

/// `nextval('seq')` becomes `seq.nextval`; other calls render as written.
fn function(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Function(f) = node else {
        return Err(node.mismatch(NodeKind::Function));
    };
    match f.args.first() {
        Some(first) if f.name.eq_ignore_ascii_case("nextval") => {
            let sequence = match first {
                Term::Literal(s) => s.trim_matches(|c: char| c == '\'' || c == '"').to_string(),
                other => r.render(Node::from(other), n)?,
            };
            Ok(format!("{}.{}", sequence, f.name))
        }
        _ => super::function(r, node, n),
    }
}

fn include(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Include(include) = node else {
        return Err(node.mismatch(NodeKind::Include));
    };
    Ok(format!("@{}", include.path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_type() {
        let d = OracleDialect;
        assert_eq!(d.translate_type(&DataType::new("integer")), DataType::with_precision("NUMBER", "10"));
        assert_eq!(d.translate_type(&DataType::with_precision("NUMERIC", "12,2")), DataType::with_precision("NUMBER", "12,2"));
        assert_eq!(d.translate_type(&DataType::with_precision("VARCHAR", "40")), DataType::with_precision("VARCHAR2", "40"));
        assert_eq!(d.translate_type(&DataType::new("TEXT")), DataType::new("CLOB"));
        assert_eq!(d.translate_type(&DataType::with_precision("CHAR", "1")), DataType::with_precision("CHAR", "1"));
    }

    #[test]
    fn test_translate_literal() {
        let d = OracleDialect;
        assert_eq!(d.translate_literal("current_timestamp"), "SYSDATE");
        assert_eq!(d.translate_literal("CURRENT_DATE"), "SYSDATE");
        assert_eq!(d.translate_literal("\"foo\""), "'foo'");
        assert_eq!(d.translate_literal("'CURRENT_DATE'"), "'CURRENT_DATE'");
        assert_eq!(d.translate_literal("seq.nextval"), "seq.nextval");
    }
}
