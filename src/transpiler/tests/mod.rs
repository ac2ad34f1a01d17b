//! Renderer tests.
//!
//! - `oracle`: layouts and translations for the full dialect
//! - `postgres`: layouts and translations for the lean dialect

mod oracle;

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use crate::ast::NodeKind;
use crate::error::ChameleonError;
use crate::parser::parse;
use crate::transpiler::sql::base_handlers;
use crate::transpiler::sql::oracle::OracleDialect;
use crate::transpiler::*;

pub(super) fn render_as(dialect: Dialect, options: RenderOptions, text: &str) -> String {
    let script = parse(text).unwrap();
    render(&script, dialect, options).unwrap()
}

/// Expected script output: one statement per entry.
pub(super) fn lines(lines: &[&str]) -> String {
    format!("{}\n", lines.join("\n"))
}

struct Partial;

impl DdlDialect for Partial {
    fn name(&self) -> &'static str {
        "partial"
    }

    fn handlers(&self) -> HashMap<NodeKind, Handler> {
        base_handlers()
    }

    fn translate_type(&self, t: &crate::ast::DataType) -> crate::ast::DataType {
        t.clone()
    }

    fn translate_literal(&self, literal: &str) -> String {
        literal.to_string()
    }
}

struct Unordered;

impl DdlDialect for Unordered {
    fn name(&self) -> &'static str {
        "unordered"
    }

    fn handlers(&self) -> HashMap<NodeKind, Handler> {
        OracleDialect.handlers()
    }

    fn ordering(&self) -> &'static [NodeKind] {
        &[NodeKind::Table]
    }

    fn translate_type(&self, t: &crate::ast::DataType) -> crate::ast::DataType {
        t.clone()
    }

    fn translate_literal(&self, literal: &str) -> String {
        literal.to_string()
    }
}

#[test]
fn test_collapse() {
    assert_eq!(collapse("a\n\n\nb\n\nc\n"), "a\nb\nc\n");
    assert_eq!(collapse("no breaks"), "no breaks");
}

#[test]
fn test_builtin_dialects_are_complete() {
    for dialect in [Dialect::Oracle, Dialect::Postgres] {
        assert!(Renderer::new(dialect, RenderOptions::default()).is_ok(), "{dialect}");
    }
}

#[test]
fn test_missing_handler_is_rejected() {
    let err = Renderer::with_dialect(Box::new(Partial), RenderOptions::default())
        .err()
        .unwrap();
    assert!(
        matches!(
            err,
            ChameleonError::MissingHandler {
                dialect: "partial",
                kind: "Synonym"
            }
        ),
        "{err}"
    );
}

#[test]
fn test_missing_ordering_is_rejected() {
    let err = Renderer::with_dialect(Box::new(Unordered), RenderOptions::default())
        .err()
        .unwrap();
    assert!(
        matches!(err, ChameleonError::MissingOrdering { kind: "Index" }),
        "{err}"
    );
}

#[test]
fn test_handler_mismatch_message() {
    assert_eq!(
        Node::Commit.mismatch(NodeKind::Table).to_string(),
        "plugin for Table cannot render Commit"
    );
}

#[test]
fn test_dialect_from_str() {
    assert_eq!("Oracle".parse::<Dialect>(), Ok(Dialect::Oracle));
    assert_eq!("postgresql".parse::<Dialect>(), Ok(Dialect::Postgres));
    assert!("mysql".parse::<Dialect>().is_err());
    assert_eq!(Dialect::default(), Dialect::Oracle);
}

const UNSORTED: &str = "CREATE INDEX i ON t (a);\nCOMMIT;\nCREATE TABLE t (a NUMBER);\nDROP TABLE old;";

#[test]
fn test_script_order_is_kept_by_default() {
    let out = render_as(Dialect::Oracle, RenderOptions::default(), UNSORTED);
    assert_eq!(
        out,
        lines(&[
            "CREATE INDEX i\n    ON t (a);",
            "",
            "COMMIT;",
            "",
            "CREATE TABLE t\n(\n    a  NUMBER\n)\n;",
            "",
            "DROP TABLE old;",
        ])
    );
}

#[test]
fn test_sort_orders_statements_by_kind() {
    let options = RenderOptions {
        sort: true,
        ..Default::default()
    };
    let out = render_as(Dialect::Oracle, options, UNSORTED);
    assert_eq!(
        out,
        lines(&[
            "DROP TABLE old;",
            "",
            "CREATE TABLE t\n(\n    a  NUMBER\n)\n;",
            "",
            "CREATE INDEX i\n    ON t (a);",
            "",
            "COMMIT;",
        ])
    );
}

#[test]
fn test_column_modifiers_are_always_sorted() {
    let out = render_as(
        Dialect::Oracle,
        RenderOptions::default(),
        "CREATE TABLE t (a NOT NULL NUMBER);",
    );
    assert_eq!(out, lines(&["CREATE TABLE t", "(", "    a  NUMBER NOT NULL", ")", ";"]));
}

#[test]
fn test_empty_script() {
    let out = render_as(Dialect::Postgres, RenderOptions::default(), "");
    assert_eq!(out, "");
}
