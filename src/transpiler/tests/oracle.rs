use pretty_assertions::assert_eq;

use super::{lines, render_as};
use crate::transpiler::{Dialect, RenderOptions};

fn oracle(text: &str) -> String {
    render_as(Dialect::Oracle, RenderOptions::default(), text)
}

#[test]
fn test_table_layout() {
    let out = oracle(
        "CREATE TABLE t (\n\
           id NUMBER(10) NOT NULL,\n\
           label VARCHAR2(40) DEFAULT 'x' NOT NULL,\n\
           CONSTRAINT t_pk PRIMARY KEY (id) USING INDEX TABLESPACE idx_ts\n\
         ) TABLESPACE users_ts NOLOGGING;",
    );
    assert_eq!(
        out,
        lines(&[
            "CREATE TABLE t",
            "(",
            "    id     NUMBER(10) NOT NULL,",
            "    label  VARCHAR2(40) ",
            "               DEFAULT ('x') NOT NULL,",
            "    CONSTRAINT t_pk PRIMARY KEY (id) ",
            "        USING INDEX TABLESPACE idx_ts",
            ")",
            "TABLESPACE users_ts",
            "NOLOGGING",
            ";",
        ])
    );
}

#[test]
fn test_column_constraint_layout() {
    let out = oracle(
        "CREATE TABLE c (\n\
           id NUMBER CONSTRAINT c_pk PRIMARY KEY,\n\
           p_id NUMBER CONSTRAINT c_p_fk REFERENCES p (id) ON DELETE CASCADE,\n\
           qty NUMBER CHECK (qty > 0)\n\
         );",
    );
    assert_eq!(
        out,
        lines(&[
            "CREATE TABLE c",
            "(",
            "    id    NUMBER ",
            "              CONSTRAINT c_pk PRIMARY KEY,",
            "    p_id  NUMBER ",
            "              CONSTRAINT c_p_fk",
            "                  REFERENCES p (id) ",
            "                  ON DELETE CASCADE,",
            "    qty   NUMBER ",
            "              CHECK (qty > 0)",
            ")",
            ";",
        ])
    );
}

#[test]
fn test_table_constraint_layout() {
    let out = oracle(
        "CREATE TABLE o (\n\
           a NUMBER,\n\
           b NUMBER,\n\
           CONSTRAINT o_fk FOREIGN KEY (a, b) REFERENCES p (x, y) ON DELETE SET NULL,\n\
           UNIQUE (a, b),\n\
           CONSTRAINT o_ck CHECK (a > b OR b IS NULL)\n\
         );",
    );
    assert_eq!(
        out,
        lines(&[
            "CREATE TABLE o",
            "(",
            "    a  NUMBER,",
            "    b  NUMBER,",
            "    CONSTRAINT o_fk FOREIGN KEY (a, b)",
            "        REFERENCES p (x, y) ",
            "            ON DELETE SET NULL,",
            "    UNIQUE (a, b),",
            "    CONSTRAINT o_ck",
            "        CHECK (a > b OR b IS NULL)",
            ")",
            ";",
        ])
    );
}

#[test]
fn test_global_temporary_table() {
    let out = oracle("CREATE GLOBAL TEMPORARY TABLE tmp (a NUMBER) ON COMMIT PRESERVE ROWS;");
    assert_eq!(
        out,
        lines(&[
            "CREATE GLOBAL TEMPORARY TABLE tmp",
            "(",
            "    a  NUMBER",
            ")",
            "ON COMMIT PRESERVE ROWS",
            ";",
        ])
    );
}

#[test]
fn test_types_and_literals_from_postgres() {
    let out = oracle(
        "CREATE TABLE t (\n\
           a INTEGER, b BIGINT, c VARCHAR(20), d TEXT, e TIMESTAMPTZ, f BYTEA,\n\
           g NUMERIC(12,2),\n\
           h DATE DEFAULT CURRENT_TIMESTAMP,\n\
           i NUMBER DEFAULT nextval('s')\n\
         );",
    );
    assert_eq!(
        out,
        lines(&[
            "CREATE TABLE t",
            "(",
            "    a  NUMBER(10),",
            "    b  NUMBER(19),",
            "    c  VARCHAR2(20),",
            "    d  CLOB,",
            "    e  DATE,",
            "    f  BLOB,",
            "    g  NUMBER(12,2),",
            "    h  DATE ",
            "           DEFAULT (SYSDATE),",
            "    i  NUMBER ",
            "           DEFAULT (s.nextval)",
            ")",
            ";",
        ])
    );
}

#[test]
fn test_deferrable_follows_the_clause_only() {
    let options = RenderOptions {
        deferrable: true,
        ..Default::default()
    };
    let out = render_as(
        Dialect::Oracle,
        options,
        "CREATE TABLE t (a NUMBER REFERENCES p (id) DEFERRABLE, b NUMBER REFERENCES p (id));",
    );
    assert_eq!(
        out,
        lines(&[
            "CREATE TABLE t",
            "(",
            "    a  NUMBER ",
            "           REFERENCES p (id) DEFERRABLE,",
            "    b  NUMBER ",
            "           REFERENCES p (id)",
            ")",
            ";",
        ])
    );
}

#[test]
fn test_other_statements() {
    let out = oracle(
        "CREATE UNIQUE INDEX i ON t (a, b) TABLESPACE idx_ts PARALLEL 4;\n\
         CREATE SEQUENCE s START WITH 100 ORDER;\n\
         CREATE SYNONYM syn FOR t;\n\
         COMMENT ON TABLE t IS 'Orders';\n\
         COMMENT ON COLUMN t.a IS \"Amount\";\n\
         INSERT INTO t (a, b) VALUES (s.nextval, \"foo\");\n\
         COMMIT;\n\
         DROP TABLE old;\n\
         @setup.sql\n",
    );
    assert_eq!(
        out,
        lines(&[
            "CREATE UNIQUE INDEX i\n    ON t (a, b)\n    TABLESPACE idx_ts\n    PARALLEL 4;",
            "",
            "CREATE SEQUENCE s START WITH 100 ORDER;",
            "",
            "CREATE SYNONYM syn FOR t;",
            "",
            "COMMENT ON TABLE t IS 'Orders';",
            "",
            "COMMENT ON COLUMN t.a IS 'Amount';",
            "",
            "INSERT INTO t\n    (a, b)\nVALUES\n    (s.nextval, 'foo');",
            "",
            "COMMIT;",
            "",
            "DROP TABLE old;",
            "",
            "@setup.sql",
        ])
    );
}

#[test]
fn test_quotes_inside_literals_are_doubled() {
    let out = oracle(
        "COMMENT ON TABLE t IS \"it's\";\n\
         COMMENT ON COLUMN t.a IS 'o''clock';\n\
         INSERT INTO t VALUES (\"it's\");\n",
    );
    assert_eq!(
        out,
        lines(&[
            "COMMENT ON TABLE t IS 'it''s';",
            "",
            "COMMENT ON COLUMN t.a IS 'o''clock';",
            "",
            "INSERT INTO t\nVALUES\n    ('it''s');",
        ])
    );
}

#[test]
fn test_disable_row_movement() {
    let out = oracle("CREATE TABLE t (a NUMBER) DISABLE ROW MOVEMENT;");
    assert_eq!(
        out,
        lines(&["CREATE TABLE t", "(", "    a  NUMBER", ")", "DISABLE ROW MOVEMENT", ";"])
    );
}

#[test]
fn test_alter_statements() {
    let out = oracle(
        "ALTER TABLE t ADD (x NUMBER, CONSTRAINT t_uq UNIQUE (x));\n\
         ALTER TABLE t RENAME COLUMN a TO b;\n\
         ALTER TABLE t RENAME TO u;\n\
         ALTER TABLE u DROP COLUMN y;\n\
         ALTER TABLE u MODIFY (a NUMBER(5) NOT NULL, bb CHAR);\n\
         ALTER TABLE u NOLOGGING;\n\
         ALTER INDEX i TABLESPACE idx_ts;",
    );
    assert_eq!(
        out,
        lines(&[
            "ALTER TABLE t\n    ADD x NUMBER,\n    ADD CONSTRAINT t_uq UNIQUE (x);",
            "",
            "ALTER TABLE t RENAME COLUMN a TO b;",
            "",
            "ALTER TABLE t RENAME TO u;",
            "",
            "ALTER TABLE u\n    DROP COLUMN y;",
            "",
            "ALTER TABLE u\nMODIFY\n(\n    a       NUMBER(5) NOT NULL,\n    bb      CHAR\n);",
            "",
            "ALTER TABLE u\n    NOLOGGING;",
            "",
            "ALTER INDEX i\n    TABLESPACE idx_ts;",
        ])
    );
}
