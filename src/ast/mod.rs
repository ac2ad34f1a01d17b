//! The DDL syntax tree.
//!
//! Every construct is a plain owned value. Column-level and table-level
//! constraints share their fields through the `*Clause` structs in
//! [`constraint`], and each node reports a [`NodeKind`] tag that the
//! renderer dispatches on.

pub mod constraint;
pub mod expr;
pub mod kind;
pub mod script;
pub mod stmt;
pub mod table;

pub use constraint::*;
pub use expr::*;
pub use kind::NodeKind;
pub use script::{Catalog, Script};
pub use stmt::*;
pub use table::*;
