//! # Chameleon: a schema DDL transpiler
//!
//! Reads SQL schema scripts (tables, indexes, sequences, synonyms, alters,
//! comments, inserts) written for one database and re-renders them for
//! another. Optional optimizer passes fold scattered `ALTER` statements
//! back into the `CREATE` statements they amend and normalize constraints.
//!
//! ## Quick Example
//!
//! ```
//! use chameleon::prelude::*;
//!
//! let (sql, warnings) = chameleon::transpile(
//!     "CREATE TABLE t (id NUMBER(10));\nALTER TABLE t ADD (name VARCHAR2(40));",
//!     Level::Basic,
//!     Dialect::Postgres,
//!     RenderOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(sql, "CREATE TABLE t\n(\n    id    INTEGER,\n    name  VARCHAR(40)\n)\n;\n");
//! assert_eq!(warnings.len(), 1);
//! ```
//!
//! ## Pipeline
//!
//! | Stage       | Module          | Result                     |
//! |-------------|-----------------|----------------------------|
//! | lex + parse | [`parser`]      | [`ast::Script`]            |
//! | optimize    | [`optimizer`]   | rewritten script, warnings |
//! | render      | [`transpiler`]  | DDL text for a dialect     |

pub mod ast;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod parser;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::optimizer::{Level, Optimizer, Warning, WarningCode};
    pub use crate::parser::parse;
    pub use crate::transpiler::{Dialect, RenderOptions, Renderer};
}

use ast::Script;
use error::ChameleonResult;
use optimizer::{Level, Warning};
use transpiler::{Dialect, RenderOptions};

/// Parse a DDL script.
///
/// # Example
///
/// ```
/// let script = chameleon::parse("CREATE SEQUENCE s START WITH 1;").unwrap();
/// assert_eq!(script.sequences().count(), 1);
/// ```
pub fn parse(text: &str) -> ChameleonResult<Script> {
    parser::parse(text)
}

/// Apply one optimizer level.
pub fn optimize(level: Level, script: Script) -> (Script, Vec<Warning>) {
    optimizer::optimize(level, script)
}

/// Render a script for `dialect`.
pub fn render(script: &Script, dialect: Dialect, options: RenderOptions) -> ChameleonResult<String> {
    transpiler::render(script, dialect, options)
}

/// Parse, optimize and render in one call.
pub fn transpile(
    text: &str,
    level: Level,
    dialect: Dialect,
    options: RenderOptions,
) -> ChameleonResult<(String, Vec<Warning>)> {
    let script = parse(text)?;
    let (script, warnings) = optimize(level, script);
    Ok((render(&script, dialect, options)?, warnings))
}
