//! End-to-end: parse, optimize, render.

use pretty_assertions::assert_eq;

use chameleon::error::ChameleonError;
use chameleon::optimizer::{Level, WarningCode};
use chameleon::parser::parse_with_diagnostics;
use chameleon::transpiler::{Dialect, RenderOptions};

fn lines(lines: &[&str]) -> String {
    format!("{}\n", lines.join("\n"))
}

fn codes(warnings: &[chameleon::optimizer::Warning]) -> Vec<u16> {
    warnings.iter().map(|w| w.code.code()).collect()
}

#[test]
fn test_best_to_postgres_drops_index_covered_by_primary_key() {
    let (sql, warnings) = chameleon::transpile(
        "CREATE TABLE t (id NUMBER(10) CONSTRAINT t_pk PRIMARY KEY, name VARCHAR2(40) NOT NULL);\n\
         CREATE UNIQUE INDEX t_pk_idx ON t (id);",
        Level::Best,
        Dialect::Postgres,
        RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(
        sql,
        lines(&[
            "CREATE TABLE t",
            "(",
            "    id    INTEGER ",
            "              CONSTRAINT t_pk PRIMARY KEY,",
            "    name  VARCHAR(40) NOT NULL",
            ")",
            ";",
        ])
    );
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, WarningCode::RedundantIndex);
    assert_eq!(warnings[0].args, ["t_pk_idx", "t_pk", "t"]);
}

#[test]
fn test_basic_folds_alter_into_create() {
    let text = "CREATE TABLE t (id NUMBER(10));\n\
                ALTER TABLE t ADD CONSTRAINT t_pk PRIMARY KEY (id);";

    let (sql, warnings) =
        chameleon::transpile(text, Level::Basic, Dialect::Oracle, RenderOptions::default()).unwrap();
    assert_eq!(
        sql,
        lines(&[
            "CREATE TABLE t",
            "(",
            "    id  NUMBER(10),",
            "    CONSTRAINT t_pk PRIMARY KEY (id)",
            ")",
            ";",
        ])
    );
    assert_eq!(codes(&warnings), [1]);

    let (sql, warnings) =
        chameleon::transpile(text, Level::Best, Dialect::Oracle, RenderOptions::default()).unwrap();
    assert_eq!(
        sql,
        lines(&[
            "CREATE TABLE t",
            "(",
            "    id  NUMBER(10) ",
            "            CONSTRAINT t_pk PRIMARY KEY",
            ")",
            ";",
        ])
    );
    assert_eq!(codes(&warnings), [1, 40]);
}

#[test]
fn test_alter_before_create_is_folded() {
    let (sql, warnings) = chameleon::transpile(
        "ALTER TABLE t ADD (COLUMN x NUMBER);\nCREATE TABLE t (id NUMBER(10));",
        Level::Basic,
        Dialect::Oracle,
        RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(
        sql,
        lines(&["CREATE TABLE t", "(", "    id  NUMBER(10),", "    x   NUMBER", ")", ";"])
    );
    assert_eq!(codes(&warnings), [1]);
}

#[test]
fn test_without_optimizer_alters_are_kept() {
    let (sql, warnings) = chameleon::transpile(
        "CREATE TABLE t (id NUMBER(10));\nALTER TABLE t NOLOGGING;",
        Level::None,
        Dialect::Oracle,
        RenderOptions::default(),
    )
    .unwrap();
    assert!(warnings.is_empty());
    assert!(sql.ends_with("ALTER TABLE t\n    NOLOGGING;\n"), "{sql}");
}

#[test]
fn test_double_quoted_strings_become_single_quoted() {
    for dialect in [Dialect::Oracle, Dialect::Postgres] {
        let (sql, _) = chameleon::transpile(
            "INSERT INTO t VALUES (\"foo\");",
            Level::None,
            dialect,
            RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(sql, "INSERT INTO t\nVALUES\n    ('foo');\n", "{dialect}");
    }
}

#[test]
fn test_best_is_idempotent() {
    let script = chameleon::parse(
        "CREATE TABLE p (id NUMBER(10), code CHAR(3) NOT NULL);\n\
         CREATE TABLE c (id NUMBER(10) PRIMARY KEY NOT NULL, p_id NUMBER(10) REFERENCES p (id));\n\
         ALTER TABLE p ADD CONSTRAINT p_pk PRIMARY KEY (id);\n\
         ALTER TABLE p ADD CONSTRAINT p_code_uq UNIQUE (code);\n\
         CREATE UNIQUE INDEX p_code_idx ON p (code) TABLESPACE idx_ts;",
    )
    .unwrap();
    let (once, warnings) = chameleon::optimize(Level::Best, script);
    assert!(!warnings.is_empty());
    let (twice, warnings) = chameleon::optimize(Level::Best, once.clone());
    assert_eq!(twice, once);
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn test_sorted_output() {
    let options = RenderOptions {
        sort: true,
        ..Default::default()
    };
    let (sql, _) = chameleon::transpile(
        "COMMIT;\nCREATE SEQUENCE s;\nDROP SEQUENCE s;",
        Level::None,
        Dialect::Postgres,
        options,
    )
    .unwrap();
    assert_eq!(sql, "DROP SEQUENCE s;\n\nCREATE SEQUENCE s;\n\nCOMMIT;\n");
}

#[test]
fn test_syntax_error_is_located() {
    let err = chameleon::parse("CREATE TABLE t (\n  id NUMBER,\n  );").unwrap_err();
    match err {
        ChameleonError::Syntax { line, value, .. } => {
            assert_eq!(line, 3);
            assert_eq!(value, ")");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unexpected_end_of_input() {
    let err = chameleon::parse("CREATE TABLE t (id NUMBER").unwrap_err();
    assert!(matches!(err, ChameleonError::UnexpectedEof { .. }), "{err}");
}

#[test]
fn test_bad_characters_are_skipped() {
    let (script, skipped) = parse_with_diagnostics("CREATE SEQUENCE s $START WITH 1;").unwrap();
    assert_eq!(script.len(), 1);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].ch, '$');
}
