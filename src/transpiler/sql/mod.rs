//! Handlers shared by both dialects.
//!
//! Layout conventions: a handler called at column `n` writes its own
//! first line at `n` (statements and table elements) or starts a new line
//! at `n + TAB` (clauses hanging off a column). Nested clauses step one
//! more `TAB` to the right.

pub mod oracle;
pub mod postgres;

use std::collections::HashMap;

use crate::ast::*;
use crate::error::ChameleonResult;
use crate::transpiler::{indent, Handler, Node, Renderer, TAB};

/// Handlers for every kind whose layout does not depend on the dialect.
/// Storage options, synonyms and includes are left to each dialect.
pub fn base_handlers() -> HashMap<NodeKind, Handler> {
    let mut h: HashMap<NodeKind, Handler> = HashMap::new();
    h.insert(NodeKind::Table, table);
    h.insert(NodeKind::Column, column);
    h.insert(NodeKind::DataType, data_type);
    h.insert(NodeKind::Default, default_value);
    h.insert(NodeKind::NotNull, not_null);
    h.insert(NodeKind::PkMod, pk_mod);
    h.insert(NodeKind::UniqueMod, unique_mod);
    h.insert(NodeKind::FkMod, fk_mod);
    h.insert(NodeKind::CkMod, ck_mod);
    h.insert(NodeKind::PrimaryKey, primary_key);
    h.insert(NodeKind::Unique, unique);
    h.insert(NodeKind::ForeignKey, foreign_key);
    h.insert(NodeKind::Check, check);
    h.insert(NodeKind::OnDeleteCascade, on_delete);
    h.insert(NodeKind::OnDeleteSetNull, on_delete);
    h.insert(NodeKind::OnCommit, on_commit);
    h.insert(NodeKind::Index, index);
    h.insert(NodeKind::Sequence, sequence);
    h.insert(NodeKind::StartWith, start_with);
    h.insert(NodeKind::Order, order);
    h.insert(NodeKind::AlterTable, alter_table);
    h.insert(NodeKind::AlterIndex, alter_index);
    h.insert(NodeKind::Rename, rename);
    h.insert(NodeKind::Modify, modify);
    h.insert(NodeKind::Drop, drop_stmt);
    h.insert(NodeKind::TableComment, comment);
    h.insert(NodeKind::ColumnComment, comment);
    h.insert(NodeKind::Insert, insert);
    h.insert(NodeKind::Commit, commit);
    h.insert(NodeKind::Function, function);
    h.insert(NodeKind::Expression, expression);
    h.insert(NodeKind::Literal, literal);
    h
}

/// For constructs the target dialect has no syntax for.
pub fn empty(_: &Renderer, _: Node<'_>, _: usize) -> ChameleonResult<String> {
    Ok(String::new())
}

/// Quoted literals: single quotes pass through, double quotes become single.
pub fn requoted(literal: &str) -> Option<String> {
    if literal.len() < 2 {
        return None;
    }
    if literal.starts_with('\'') && literal.ends_with('\'') {
        return Some(literal.to_string());
    }
    if literal.starts_with('"') && literal.ends_with('"') {
        return Some(quoted(&literal[1..literal.len() - 1]));
    }
    None
}

/// `text` as a single-quoted literal.
pub fn quoted(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Name column width for a list of aligned columns.
fn margin(columns: &[Column], n: usize) -> usize {
    let widest = columns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    widest + n + 2
}

fn render_all<'a, I>(r: &Renderer, nodes: I, n: usize) -> ChameleonResult<Vec<String>>
where
    I: IntoIterator<Item = Node<'a>>,
{
    nodes.into_iter().map(|node| r.render(node, n)).collect()
}

// ---------- tables ----------

fn table(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Table(table) = node else {
        return Err(node.mismatch(NodeKind::Table));
    };
    let width = margin(&table.columns, n);
    let mut s = String::from("CREATE ");
    if table.global {
        s.push_str("GLOBAL ");
    }
    if table.temporary {
        s.push_str("TEMPORARY ");
    }
    s.push_str("TABLE ");
    s.push_str(&table.name);
    s.push_str("\n(");

    let mut body = render_all(r, table.columns.iter().map(|c| Node::Column(c, width)), n + TAB)?;
    body.extend(render_all(r, table.constraints.iter().map(Node::Constraint), n + TAB)?);
    s.push('\n');
    s.push_str(&body.join(",\n"));
    s.push_str("\n)");

    for m in &table.modifiers {
        s.push_str(&r.render(Node::Modifier(m), n)?);
    }
    s.push_str("\n;");
    Ok(s)
}

/// Name padded to `width`, then the modifiers in precedence order. After
/// the first modifier, continuation lines hang under the type column.
fn column(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Column(column, width) = node else {
        return Err(node.mismatch(NodeKind::Column));
    };
    let mut s = indent(n);
    s.push_str(&column.name);
    s.push_str(&indent(width.saturating_sub(column.name.chars().count()).max(1)));

    let mut n = n;
    let mut width = width;
    let mut parts = Vec::with_capacity(column.modifiers.len());
    for m in r.sorted(&column.modifiers, ColumnModifier::kind)? {
        parts.push(r.render(Node::ColumnModifier(m), n)?);
        if width > 0 {
            n += width;
            width = 0;
        }
    }
    s.push_str(&parts.join(" "));
    Ok(s)
}

fn data_type(r: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::ColumnModifier(ColumnModifier::Type(data_type)) = node else {
        return Err(node.mismatch(NodeKind::DataType));
    };
    let t = r.dialect().translate_type(data_type);
    let mut s = t.name.to_ascii_uppercase();
    if let Some(precision) = &t.precision {
        s.push('(');
        s.push_str(precision);
        s.push(')');
    }
    Ok(s)
}

fn default_value(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::ColumnModifier(ColumnModifier::Default(value)) = node else {
        return Err(node.mismatch(NodeKind::Default));
    };
    Ok(format!(
        "\n{}DEFAULT ({})",
        indent(n + TAB),
        r.render(Node::from(value), n)?
    ))
}

fn not_null(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::ColumnModifier(ColumnModifier::NotNull(nn)) = node else {
        return Err(node.mismatch(NodeKind::NotNull));
    };
    Ok(match &nn.name {
        Some(name) => format!("CONSTRAINT {} NOT NULL", name),
        None => "NOT NULL".to_string(),
    })
}

// ---------- keys ----------

fn pk_mod(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::ColumnModifier(ColumnModifier::PrimaryKey(key)) = node else {
        return Err(node.mismatch(NodeKind::PkMod));
    };
    key_mod(r, key, "PRIMARY KEY", n)
}

fn unique_mod(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::ColumnModifier(ColumnModifier::Unique(key)) = node else {
        return Err(node.mismatch(NodeKind::UniqueMod));
    };
    key_mod(r, key, "UNIQUE", n)
}

fn key_mod(r: &Renderer, key: &KeyClause, keyword: &str, n: usize) -> ChameleonResult<String> {
    let mut s = String::new();
    if let Some(name) = &key.name {
        s.push('\n');
        s.push_str(&indent(n + TAB));
        s.push_str("CONSTRAINT ");
        s.push_str(name);
        s.push(' ');
    }
    s.push_str(keyword);
    for m in &key.modifiers {
        s.push_str(&r.render(Node::Modifier(m), n + TAB)?);
    }
    Ok(s)
}

fn primary_key(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Constraint(Constraint::PrimaryKey { key, columns }) = node else {
        return Err(node.mismatch(NodeKind::PrimaryKey));
    };
    key_constraint(r, key, "PRIMARY KEY", columns, n)
}

fn unique(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Constraint(Constraint::Unique { key, columns }) = node else {
        return Err(node.mismatch(NodeKind::Unique));
    };
    key_constraint(r, key, "UNIQUE", columns, n)
}

fn key_constraint(
    r: &Renderer,
    key: &KeyClause,
    keyword: &str,
    columns: &[String],
    n: usize,
) -> ChameleonResult<String> {
    let mut s = indent(n);
    if let Some(name) = &key.name {
        s.push_str("CONSTRAINT ");
        s.push_str(name);
        s.push(' ');
    }
    s.push_str(&format!("{} ({})", keyword, columns.join(", ")));
    for m in &key.modifiers {
        let text = r.render(Node::Modifier(m), n + TAB)?;
        if !text.is_empty() {
            s.push(' ');
            s.push_str(&text);
        }
    }
    Ok(s)
}

// ---------- foreign keys and checks ----------

fn foreign_key(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Constraint(Constraint::ForeignKey { fk, columns }) = node else {
        return Err(node.mismatch(NodeKind::ForeignKey));
    };
    let mut s = indent(n);
    if let Some(name) = &fk.name {
        s.push_str("CONSTRAINT ");
        s.push_str(name);
        s.push(' ');
    }
    s.push_str(&format!("FOREIGN KEY ({})\n", columns.join(", ")));
    s.push_str(&indent(n + TAB));
    s.push_str(&references(r, fk, n)?);
    Ok(s)
}

fn fk_mod(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::ColumnModifier(ColumnModifier::ForeignKey(fk)) = node else {
        return Err(node.mismatch(NodeKind::FkMod));
    };
    let mut s = format!("\n{}", indent(n + TAB));
    if let Some(name) = &fk.name {
        s.push_str(&format!("CONSTRAINT {}\n{}", name, indent(n + 2 * TAB)));
    }
    s.push_str(&references(r, fk, n)?);
    Ok(s)
}

/// `REFERENCES t (cols)` plus the delete rule and deferral.
fn references(r: &Renderer, fk: &ForeignKeyClause, n: usize) -> ChameleonResult<String> {
    let mut s = format!(
        "REFERENCES {} ({})",
        fk.target.table,
        fk.target.columns.join(", ")
    );
    if let Some(on_delete) = fk.on_delete {
        s.push(' ');
        s.push_str(&r.render(Node::OnDelete(on_delete), n + TAB)?);
    }
    if fk.deferrable || (r.options().deferrable && r.dialect().honors_deferrable()) {
        s.push_str(" DEFERRABLE");
    }
    Ok(s)
}

fn on_delete(_: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::OnDelete(rule) = node else {
        return Err(node.mismatch(NodeKind::OnDeleteCascade));
    };
    let action = match rule {
        OnDelete::Cascade => "CASCADE",
        OnDelete::SetNull => "SET NULL",
    };
    Ok(format!("\n{}ON DELETE {}", indent(n + TAB), action))
}

fn ck_mod(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::ColumnModifier(ColumnModifier::Check(ck)) = node else {
        return Err(node.mismatch(NodeKind::CkMod));
    };
    let mut s = format!("\n{}", indent(n + TAB));
    if let Some(name) = &ck.name {
        s.push_str(&format!("CONSTRAINT {}\n{}", name, indent(n + 2 * TAB)));
    }
    s.push_str(&format!(
        "CHECK ({})",
        r.render(Node::Expression(&ck.expression), n)?
    ));
    Ok(s)
}

fn check(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Constraint(Constraint::Check(ck)) = node else {
        return Err(node.mismatch(NodeKind::Check));
    };
    let mut s = indent(n);
    if let Some(name) = &ck.name {
        s.push_str(&format!("CONSTRAINT {}\n{}", name, indent(n + TAB)));
    }
    s.push_str(&format!(
        "CHECK ({})",
        r.render(Node::Expression(&ck.expression), n)?
    ));
    Ok(s)
}

fn on_commit(_: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Modifier(Modifier::OnCommit { preserve }) = node else {
        return Err(node.mismatch(NodeKind::OnCommit));
    };
    let rows = if *preserve { "PRESERVE" } else { "DELETE" };
    Ok(format!("\n{}ON COMMIT {} ROWS", indent(n), rows))
}

// ---------- other statements ----------

fn index(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Index(index) = node else {
        return Err(node.mismatch(NodeKind::Index));
    };
    let mut s = String::from("CREATE ");
    if index.unique {
        s.push_str("UNIQUE ");
    }
    s.push_str(&format!(
        "INDEX {}\n{}ON {} ({})",
        index.name,
        indent(n + TAB),
        index.table,
        index.columns.join(", ")
    ));
    for m in &index.modifiers {
        s.push_str(&r.render(Node::Modifier(m), n + TAB)?);
    }
    s.push(';');
    Ok(s)
}

fn sequence(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Sequence(seq) = node else {
        return Err(node.mismatch(NodeKind::Sequence));
    };
    let mut s = format!("CREATE SEQUENCE {}", seq.name);
    for option in &seq.options {
        s.push_str(&r.render(Node::SequenceOption(option), n)?);
    }
    s.push(';');
    Ok(s)
}

fn start_with(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::SequenceOption(SequenceOption::StartWith(start)) = node else {
        return Err(node.mismatch(NodeKind::StartWith));
    };
    Ok(format!(" START WITH {}", start))
}

fn order(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::SequenceOption(SequenceOption::Order) = node else {
        return Err(node.mismatch(NodeKind::Order));
    };
    Ok(" ORDER".to_string())
}

/// An alter whose every part renders empty in the target dialect is
/// dropped altogether.
fn alter_table(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::AlterTable(alter) = node else {
        return Err(node.mismatch(NodeKind::AlterTable));
    };
    let mut body = String::new();

    let mut adds = Vec::with_capacity(alter.adds.len());
    for add in &alter.adds {
        let text = r.render(Node::from(add), 0)?;
        let text = text.trim_start();
        if !text.is_empty() {
            adds.push(format!("\n{}ADD {}", indent(n + TAB), text));
        }
    }
    body.push_str(&adds.join(","));

    for m in &alter.mods {
        body.push_str(&r.render(Node::from(m), n + TAB)?);
    }
    for d in &alter.drops {
        body.push('\n');
        body.push_str(&indent(n + TAB));
        body.push_str(&r.render(Node::Drop(d), n)?);
    }

    if body.is_empty() && !alter.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("ALTER TABLE {}{};", alter.table, body))
}

fn alter_index(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::AlterIndex(alter) = node else {
        return Err(node.mismatch(NodeKind::AlterIndex));
    };
    let body = render_all(r, alter.modifiers.iter().map(Node::Modifier), n + TAB)?.concat();
    if body.is_empty() && !alter.modifiers.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("ALTER INDEX {}{};", alter.index, body))
}

fn rename(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Rename(rename) = node else {
        return Err(node.mismatch(NodeKind::Rename));
    };
    Ok(match rename {
        Rename::Table { new_name } => format!(" RENAME TO {}", new_name),
        Rename::Column { name, new_name } => format!(" RENAME COLUMN {} TO {}", name, new_name),
    })
}

fn modify(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Modify(modify) = node else {
        return Err(node.mismatch(NodeKind::Modify));
    };
    let width = margin(&modify.columns, n);
    let columns = render_all(r, modify.columns.iter().map(|c| Node::Column(c, width)), n)?;
    Ok(format!("\nMODIFY\n(\n{}\n)", columns.join(",\n")))
}

/// Column and constraint drops only appear inside `ALTER TABLE` and carry
/// no terminator of their own.
pub(crate) fn drop_stmt(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Drop(d) = node else {
        return Err(node.mismatch(NodeKind::Drop));
    };
    let terminator = match d.object {
        DropObject::Column | DropObject::Constraint => "",
        _ => ";",
    };
    Ok(format!("DROP {} {}{}", d.object.as_str(), d.name, terminator))
}

fn comment(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Comment(comment) = node else {
        return Err(node.mismatch(NodeKind::TableComment));
    };
    Ok(match comment {
        Comment::Table { table, text } => {
            format!("COMMENT ON TABLE {} IS {};", table, quoted(text))
        }
        Comment::Column {
            table,
            column,
            text,
        } => format!("COMMENT ON COLUMN {}.{} IS {};", table, column, quoted(text)),
    })
}

fn insert(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Insert(insert) = node else {
        return Err(node.mismatch(NodeKind::Insert));
    };
    let mut s = format!("INSERT INTO {}", insert.table);
    if !insert.columns.is_empty() {
        s.push_str(&format!("\n{}({})", indent(n + TAB), insert.columns.join(", ")));
    }
    let values = render_all(r, insert.values.iter().map(Node::from), n)?;
    s.push_str(&format!("\nVALUES\n{}({});", indent(n + TAB), values.join(", ")));
    Ok(s)
}

fn commit(_: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Commit = node else {
        return Err(node.mismatch(NodeKind::Commit));
    };
    Ok("COMMIT;".to_string())
}

// ---------- values ----------

pub(crate) fn function(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Function(f) = node else {
        return Err(node.mismatch(NodeKind::Function));
    };
    let args = render_all(r, f.args.iter().map(Node::from), n)?;
    Ok(format!("{}({})", f.name, args.join(", ")))
}

fn expression(r: &Renderer, node: Node<'_>, n: usize) -> ChameleonResult<String> {
    let Node::Expression(ex) = node else {
        return Err(node.mismatch(NodeKind::Expression));
    };
    Ok(render_all(r, ex.terms.iter().map(Node::from), n)?.join(" "))
}

fn literal(r: &Renderer, node: Node<'_>, _: usize) -> ChameleonResult<String> {
    let Node::Literal(text) = node else {
        return Err(node.mismatch(NodeKind::Literal));
    };
    Ok(r.xlated(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requoted() {
        assert_eq!(requoted("'a b'").as_deref(), Some("'a b'"));
        assert_eq!(requoted("\"foo\"").as_deref(), Some("'foo'"));
        assert_eq!(requoted("\"it's\"").as_deref(), Some("'it''s'"));
        assert_eq!(requoted("'it''s'").as_deref(), Some("'it''s'"));
        assert_eq!(requoted("\"").as_deref(), None);
        assert_eq!(requoted("SYSDATE"), None);
    }

    #[test]
    fn test_margin_uses_widest_name() {
        let columns = vec![Column::new("id"), Column::new("created")];
        assert_eq!(margin(&columns, 0), 9);
        assert_eq!(margin(&columns, 4), 13);
    }
}
