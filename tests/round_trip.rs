//! Rendered output parses back to the same script.

use pretty_assertions::assert_eq;

use chameleon::optimizer::Level;
use chameleon::transpiler::{Dialect, RenderOptions};

const SCHEMA: &str = "
@settings.sql
CREATE TABLE customers (
    id NUMBER(10) CONSTRAINT customers_pk PRIMARY KEY USING INDEX TABLESPACE idx_ts,
    name VARCHAR2(80) CONSTRAINT customers_name_nn NOT NULL,
    email VARCHAR2(120) UNIQUE,
    created DATE DEFAULT SYSDATE NOT NULL
) TABLESPACE data_ts NOLOGGING PARALLEL 4 ENABLE ROW MOVEMENT;

CREATE TABLE orders (
    id NUMBER(10),
    customer_id NUMBER(10) NOT NULL CONSTRAINT orders_customer_fk REFERENCES customers (id) ON DELETE CASCADE,
    status VARCHAR2(10) DEFAULT 'new' NOT NULL CHECK (status IN ('new', 'paid')),
    total NUMBER(12,2) CHECK (total BETWEEN 0 AND 1000000),
    CONSTRAINT orders_pk PRIMARY KEY (id),
    CONSTRAINT orders_total_ck CHECK (total >= 0 OR total IS NULL)
);

CREATE GLOBAL TEMPORARY TABLE scratch (k NUMBER, v CLOB) ON COMMIT DELETE ROWS;

CREATE UNIQUE INDEX orders_status_idx ON orders (status, id) TABLESPACE idx_ts NOLOGGING;
CREATE SEQUENCE orders_seq START WITH 1000 ORDER;
CREATE SYNONYM orders_syn FOR orders;

ALTER TABLE orders ADD (note VARCHAR2(200), CONSTRAINT orders_note_uq UNIQUE (note));
ALTER TABLE orders RENAME COLUMN note TO remark;
ALTER TABLE orders MODIFY (status VARCHAR2(20));
ALTER TABLE orders DROP CONSTRAINT orders_note_uq;
ALTER INDEX orders_status_idx PARALLEL;

COMMENT ON TABLE orders IS 'Customer orders';
COMMENT ON COLUMN orders.total IS 'Gross amount';

INSERT INTO orders (id, customer_id, status) VALUES (orders_seq.nextval, 1, 'paid');
INSERT INTO scratch VALUES (-1, NULL);
COMMIT;
DROP SYNONYM orders_syn;
";

#[test]
fn test_oracle_output_parses_to_the_same_script() {
    let script = chameleon::parse(SCHEMA).unwrap();
    let sql = chameleon::render(&script, Dialect::Oracle, RenderOptions::default()).unwrap();
    let reparsed = chameleon::parse(&sql).unwrap();
    assert_eq!(reparsed, script);
}

#[test]
fn test_modifiers_in_any_order_round_trip() {
    let script = chameleon::parse(
        "CREATE TABLE t (
            v NUMBER UNIQUE NOT NULL,
            w CHECK (w > 0) NUMBER DEFAULT 1,
            x REFERENCES p (id) CONSTRAINT t_x_nn NOT NULL VARCHAR2(10) PRIMARY KEY
        ) DISABLE ROW MOVEMENT;
        COMMENT ON TABLE t IS \"it's\";
        INSERT INTO t (v) VALUES ('o''clock');",
    )
    .unwrap();
    let sql = chameleon::render(&script, Dialect::Oracle, RenderOptions::default()).unwrap();
    assert_eq!(chameleon::parse(&sql).unwrap(), script);
}

#[test]
fn test_postgres_output_is_a_fixed_point() {
    let options = RenderOptions {
        sort: false,
        deferrable: true,
    };
    let script = chameleon::parse(SCHEMA).unwrap();
    let once = chameleon::render(&script, Dialect::Postgres, options).unwrap();
    let twice = chameleon::render(&chameleon::parse(&once).unwrap(), Dialect::Postgres, options).unwrap();
    assert_eq!(twice, once);
    assert!(!once.contains("TABLESPACE"));
    assert!(!once.contains("SYNONYM"));
    assert!(once.contains("\\i settings.sql"));
    assert!(once.contains("nextval('orders_seq')"));
}

#[test]
fn test_optimized_output_round_trips() {
    for level in [Level::Basic, Level::Best] {
        let (sql, _) =
            chameleon::transpile(SCHEMA, level, Dialect::Oracle, RenderOptions::default()).unwrap();
        let script = chameleon::parse(&sql).unwrap();
        let again = chameleon::render(&script, Dialect::Oracle, RenderOptions::default()).unwrap();
        assert_eq!(again, sql, "{level}");
    }
}
