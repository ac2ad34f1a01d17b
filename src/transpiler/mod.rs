//! DDL renderer.
//!
//! Turns a [`Script`] back into text for a target [`Dialect`]. Every
//! renderable node is viewed through [`Node`], which reports a
//! [`NodeKind`]; the dialect's handler table maps each kind to a plain
//! function. The table is checked for completeness when the
//! [`Renderer`] is built, so a missing mapping fails before any output
//! is produced.
//!
//! ```
//! use chameleon::parser::parse;
//! use chameleon::transpiler::{render, Dialect, RenderOptions};
//!
//! let script = parse("CREATE SEQUENCE s START WITH 10;").unwrap();
//! let sql = render(&script, Dialect::Postgres, RenderOptions::default()).unwrap();
//! assert_eq!(sql, "CREATE SEQUENCE s START WITH 10;\n");
//! ```

pub mod dialect;
pub mod sql;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{ChameleonError, ChameleonResult};

pub use dialect::{DdlDialect, Dialect};

/// Indentation step.
pub const TAB: usize = 4;

/// A dialect's formatting function for one node kind. `n` is the current
/// indentation column.
pub type Handler = fn(&Renderer, Node<'_>, usize) -> ChameleonResult<String>;

/// Default precedence for sorted output: drops first, then creates, then
/// alters and data.
pub const ORDERING: &[NodeKind] = &[
    NodeKind::Drop,
    NodeKind::Table,
    NodeKind::Column,
    NodeKind::DataType,
    NodeKind::Default,
    NodeKind::NotNull,
    NodeKind::PkMod,
    NodeKind::IndexTablespace,
    NodeKind::UniqueMod,
    NodeKind::FkMod,
    NodeKind::CkMod,
    NodeKind::PrimaryKey,
    NodeKind::ForeignKey,
    NodeKind::Unique,
    NodeKind::Check,
    NodeKind::TableComment,
    NodeKind::ColumnComment,
    NodeKind::Synonym,
    NodeKind::Index,
    NodeKind::Sequence,
    NodeKind::AlterTable,
    NodeKind::AlterIndex,
    NodeKind::Insert,
    NodeKind::Commit,
    NodeKind::Rename,
    NodeKind::Include,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Reorder statements by kind precedence instead of script order.
    pub sort: bool,
    /// Mark every foreign key `DEFERRABLE` where the dialect supports it.
    pub deferrable: bool,
}

/// A borrowed view of anything a handler can format.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Table(&'a Table),
    Index(&'a Index),
    Sequence(&'a Sequence),
    Synonym(&'a Synonym),
    AlterTable(&'a AlterTable),
    AlterIndex(&'a AlterIndex),
    Drop(&'a DropStmt),
    Comment(&'a Comment),
    Insert(&'a Insert),
    Commit,
    Include(&'a Include),
    /// A column and the width its name is padded to (0 for no alignment).
    Column(&'a Column, usize),
    ColumnModifier(&'a ColumnModifier),
    Constraint(&'a Constraint),
    OnDelete(OnDelete),
    Modifier(&'a Modifier),
    SequenceOption(&'a SequenceOption),
    Rename(&'a Rename),
    Modify(&'a Modify),
    Expression(&'a Expression),
    Function(&'a Function),
    /// Raw token text, before literal translation.
    Literal(&'a str),
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Table(_) => NodeKind::Table,
            Node::Index(_) => NodeKind::Index,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Synonym(_) => NodeKind::Synonym,
            Node::AlterTable(_) => NodeKind::AlterTable,
            Node::AlterIndex(_) => NodeKind::AlterIndex,
            Node::Drop(_) => NodeKind::Drop,
            Node::Comment(Comment::Table { .. }) => NodeKind::TableComment,
            Node::Comment(Comment::Column { .. }) => NodeKind::ColumnComment,
            Node::Insert(_) => NodeKind::Insert,
            Node::Commit => NodeKind::Commit,
            Node::Include(_) => NodeKind::Include,
            Node::Column(..) => NodeKind::Column,
            Node::ColumnModifier(m) => m.kind(),
            Node::Constraint(c) => c.kind(),
            Node::OnDelete(d) => d.kind(),
            Node::Modifier(m) => m.kind(),
            Node::SequenceOption(o) => o.kind(),
            Node::Rename(_) => NodeKind::Rename,
            Node::Modify(_) => NodeKind::Modify,
            Node::Expression(_) => NodeKind::Expression,
            Node::Function(_) => NodeKind::Function,
            Node::Literal(_) => NodeKind::Literal,
        }
    }

    /// The error a handler returns when dispatched a node it does not format.
    pub fn mismatch(&self, handler: NodeKind) -> ChameleonError {
        ChameleonError::HandlerMismatch {
            handler: handler.as_str(),
            kind: self.kind().as_str(),
        }
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::Table(t) => Node::Table(t),
            Statement::Index(i) => Node::Index(i),
            Statement::Sequence(s) => Node::Sequence(s),
            Statement::Synonym(s) => Node::Synonym(s),
            Statement::AlterTable(a) => Node::AlterTable(a),
            Statement::AlterIndex(a) => Node::AlterIndex(a),
            Statement::Drop(d) => Node::Drop(d),
            Statement::Comment(c) => Node::Comment(c),
            Statement::Insert(i) => Node::Insert(i),
            Statement::Commit => Node::Commit,
            Statement::Include(i) => Node::Include(i),
        }
    }
}

impl<'a> From<&'a Term> for Node<'a> {
    fn from(term: &'a Term) -> Self {
        match term {
            Term::Literal(s) => Node::Literal(s),
            Term::Function(f) => Node::Function(f),
            Term::Expression(e) => Node::Expression(e),
        }
    }
}

impl<'a> From<&'a Addition> for Node<'a> {
    fn from(add: &'a Addition) -> Self {
        match add {
            Addition::Column(c) => Node::Column(c, 0),
            Addition::Constraint(c) => Node::Constraint(c),
            Addition::Modifier(m) => Node::Modifier(m),
        }
    }
}

impl<'a> From<&'a Modification> for Node<'a> {
    fn from(m: &'a Modification) -> Self {
        match m {
            Modification::Rename(r) => Node::Rename(r),
            Modification::Modify(m) => Node::Modify(m),
            Modification::Modifier(m) => Node::Modifier(m),
        }
    }
}

/// `n` spaces.
pub fn indent(n: usize) -> String {
    " ".repeat(n)
}

/// Replace every run of two or more newlines with a single one.
pub fn collapse(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous = None;
    for c in s.chars() {
        if c == '\n' && previous == Some('\n') {
            continue;
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

/// Renders nodes for one dialect with one set of options.
pub struct Renderer {
    dialect: Box<dyn DdlDialect>,
    handlers: HashMap<NodeKind, Handler>,
    precedence: HashMap<NodeKind, usize>,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(dialect: Dialect, options: RenderOptions) -> ChameleonResult<Self> {
        Self::with_dialect(dialect.generator(), options)
    }

    /// Build a renderer for any [`DdlDialect`], checking that every node
    /// kind has a handler and every sortable kind has a precedence.
    pub fn with_dialect(dialect: Box<dyn DdlDialect>, options: RenderOptions) -> ChameleonResult<Self> {
        let handlers = dialect.handlers();
        if let Some(kind) = NodeKind::ALL.iter().find(|k| !handlers.contains_key(k)) {
            return Err(ChameleonError::MissingHandler {
                dialect: dialect.name(),
                kind: kind.as_str(),
            });
        }

        let precedence: HashMap<NodeKind, usize> = dialect
            .ordering()
            .iter()
            .enumerate()
            .map(|(i, k)| (*k, i))
            .collect();
        let sortable = NodeKind::STATEMENTS.iter().chain(NodeKind::COLUMN_MODIFIERS.iter());
        for kind in sortable {
            if !precedence.contains_key(kind) {
                return Err(ChameleonError::MissingOrdering {
                    kind: kind.as_str(),
                });
            }
        }

        debug!(dialect = dialect.name(), handlers = handlers.len(), "renderer ready");
        Ok(Self {
            dialect,
            handlers,
            precedence,
            options,
        })
    }

    pub fn dialect(&self) -> &dyn DdlDialect {
        self.dialect.as_ref()
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Format one node at indentation `n`, collapsing blank lines in the result.
    pub fn render(&self, node: Node<'_>, n: usize) -> ChameleonResult<String> {
        let kind = node.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(ChameleonError::MissingHandler {
                dialect: self.dialect.name(),
                kind: kind.as_str(),
            })?;
        trace!(%kind, n, "dispatch");
        Ok(collapse(&handler(self, node, n)?))
    }

    /// Format a whole script: statements separated by a blank line, with a
    /// trailing newline. Statements rendering to nothing are left out.
    pub fn render_script(&self, script: &Script) -> ChameleonResult<String> {
        let statements: Vec<&Statement> = if self.options.sort {
            self.sorted(&script.statements, Statement::kind)?
        } else {
            script.statements.iter().collect()
        };

        let mut out = Vec::with_capacity(statements.len());
        for stmt in statements {
            let text = self.render(Node::from(stmt), 0)?;
            if text.is_empty() {
                trace!(kind = %stmt.kind(), "statement omitted");
                continue;
            }
            out.push(text);
        }
        if out.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}\n", out.join("\n\n")))
    }

    /// Stable sort by kind precedence.
    pub fn sorted<'t, T>(
        &self,
        items: &'t [T],
        kind: impl Fn(&T) -> NodeKind,
    ) -> ChameleonResult<Vec<&'t T>> {
        let mut keyed = items
            .iter()
            .map(|item| Ok((self.precedence(kind(item))?, item)))
            .collect::<ChameleonResult<Vec<_>>>()?;
        keyed.sort_by_key(|(p, _)| *p);
        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    pub fn precedence(&self, kind: NodeKind) -> ChameleonResult<usize> {
        self.precedence
            .get(&kind)
            .copied()
            .ok_or(ChameleonError::MissingOrdering {
                kind: kind.as_str(),
            })
    }

    /// Translate a bare literal for the target dialect.
    pub fn xlated(&self, literal: &str) -> String {
        self.dialect.translate_literal(literal)
    }
}

/// Render a script for `dialect`.
pub fn render(script: &Script, dialect: Dialect, options: RenderOptions) -> ChameleonResult<String> {
    Renderer::new(dialect, options)?.render_script(script)
}
