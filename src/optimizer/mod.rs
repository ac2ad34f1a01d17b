//! Rewrite passes over a parsed script.
//!
//! - `none` leaves the script untouched.
//! - `basic` folds `ALTER TABLE` / `ALTER INDEX` statements into the
//!   `CREATE` statements they target.
//! - `best` runs `basic`, then normalizes constraints: single-column
//!   table constraints move onto their column, modifiers made redundant by
//!   a primary key are dropped, anonymous constraints are named, named
//!   not-null constraints are made anonymous, and indexes that duplicate a
//!   primary-key or unique constraint are removed.
//!
//! Passes take the script by value and rebuild its statement list, so no
//! statement is ever removed while it is being iterated.

mod warning;


use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ast::*;

pub use warning::{report, Warning, WarningCode, ANONYMOUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    None,
    Basic,
    Best,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Level::None),
            "basic" => Ok(Level::Basic),
            "best" => Ok(Level::Best),
            _ => Err(format!("optimizer \"{}\", not-valid (none|basic|best)", s)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::None => "none",
            Level::Basic => "basic",
            Level::Best => "best",
        })
    }
}

/// Run the passes for `level` once.
pub fn optimize(level: Level, script: Script) -> (Script, Vec<Warning>) {
    let mut optimizer = Optimizer::new(level);
    let script = optimizer.process(script);
    (script, optimizer.into_warnings())
}

/// Applies one optimization level, accumulating warnings across scripts.
#[derive(Debug, Default)]
pub struct Optimizer {
    level: Level,
    warnings: Vec<Warning>,
}

impl Optimizer {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            warnings: Vec::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Per-code summary of every warning so far.
    pub fn report(&self) -> String {
        report(&self.warnings)
    }

    pub fn process(&mut self, script: Script) -> Script {
        debug!(level = %self.level, statements = script.len(), "optimizing");
        match self.level {
            Level::None => script,
            Level::Basic => self.promote_alters(script),
            Level::Best => {
                let script = self.promote_alters(script);
                let script = self.fix_tables(script);
                self.dedup_indexes(script)
            }
        }
    }

    fn warn<I, S>(&mut self, code: WarningCode, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let warning = Warning::new(code, args);
        info!(code = code.code(), "{}", warning);
        self.warnings.push(warning);
    }

    // ---------- basic ----------

    /// Fold alters into the table or index they target.
    fn promote_alters(&mut self, script: Script) -> Script {
        let catalog = script.catalog();
        let mut slots: Vec<Option<Statement>> = script.statements.into_iter().map(Some).collect();

        for &pos in &catalog.extra {
            match slots[pos].take() {
                Some(Statement::AlterTable(alter)) => {
                    let target = catalog.table(&alter.table);
                    let alter = match slot_mut(&mut slots, target) {
                        Some(Statement::Table(table)) => self.fold_alter_table(alter, table),
                        _ => Some(alter),
                    };
                    slots[pos] = alter.map(Statement::AlterTable);
                }
                Some(Statement::AlterIndex(alter)) => {
                    let target = catalog.index(&alter.index);
                    match slot_mut(&mut slots, target) {
                        Some(Statement::Index(index)) => {
                            self.warn(WarningCode::AlterIndexPromoted, [index.name.as_str()]);
                            index.modifiers.extend(alter.modifiers);
                        }
                        _ => slots[pos] = Some(Statement::AlterIndex(alter)),
                    }
                }
                other => slots[pos] = other,
            }
        }

        Script::new(slots.into_iter().flatten().collect())
    }

    /// Move additions and modifier changes into `table`. Returns what is
    /// left of the alter, if anything. Any alter on a known table warns,
    /// even when nothing can be moved.
    fn fold_alter_table(&mut self, alter: AlterTable, table: &mut Table) -> Option<AlterTable> {
        let AlterTable {
            table: name,
            adds,
            mods,
            drops,
        } = alter;
        let (moved, kept): (Vec<_>, Vec<_>) = mods
            .into_iter()
            .partition(|m| matches!(m, Modification::Modifier(_)));

        self.warn(WarningCode::AlterTablePromoted, [table.name.as_str()]);
        for add in adds {
            match add {
                Addition::Column(c) => table.add_column(c),
                Addition::Constraint(c) => table.constraints.push(c),
                Addition::Modifier(m) => table.modifiers.push(m),
            }
        }
        for m in moved {
            if let Modification::Modifier(m) = m {
                table.modifiers.push(m);
            }
        }

        let rest = AlterTable {
            table: name,
            adds: Vec::new(),
            mods: kept,
            drops,
        };
        (!rest.is_empty()).then_some(rest)
    }

    // ---------- best: tables ----------

    fn fix_tables(&mut self, mut script: Script) -> Script {
        for stmt in &mut script.statements {
            if let Statement::Table(table) = stmt {
                self.promote_constraints(table);
                let table_name = table.name.clone();
                for column in &mut table.columns {
                    self.remove_redundant(&table_name, column);
                    self.name_anonymous(&table_name, column);
                    self.anonymize_not_null(&table_name, column);
                }
            }
        }
        script
    }

    /// Move single-column table constraints onto their column.
    fn promote_constraints(&mut self, table: &mut Table) {
        let constraints = std::mem::take(&mut table.constraints);
        for constraint in constraints {
            let target = promotion_target(&constraint).map(|(k, c)| (k, c.to_string()));
            let Some((kind, column_name)) = target else {
                table.constraints.push(constraint);
                continue;
            };
            if table.column(&column_name).is_none() {
                table.constraints.push(constraint);
                continue;
            }
            self.warn(
                WarningCode::TableConstraintPromoted,
                [
                    kind,
                    constraint.name().unwrap_or(ANONYMOUS),
                    table.name.as_str(),
                    column_name.as_str(),
                ],
            );
            let modifier = match constraint {
                Constraint::PrimaryKey { key, .. } => ColumnModifier::PrimaryKey(key),
                Constraint::Unique { key, .. } => ColumnModifier::Unique(key),
                Constraint::ForeignKey { fk, .. } => ColumnModifier::ForeignKey(fk),
                Constraint::Check(ck) => ColumnModifier::NotNull(NotNull { name: ck.name }),
            };
            if let Some(column) = table.column_mut(&column_name) {
                column.modifiers.push(modifier);
            }
        }
    }

    /// A primary key makes not-null and unique on the same column redundant.
    fn remove_redundant(&mut self, table: &str, column: &mut Column) {
        if !column.has_primary_key() {
            return;
        }
        let modifiers = std::mem::take(&mut column.modifiers);
        for m in modifiers {
            match m {
                ColumnModifier::NotNull(_) => {
                    self.warn(WarningCode::RedundantNotNull, [table, column.name.as_str()]);
                }
                ColumnModifier::Unique(key) => {
                    self.warn(
                        WarningCode::RedundantUnique,
                        [key.name().unwrap_or(ANONYMOUS), table, column.name.as_str()],
                    );
                }
                other => column.modifiers.push(other),
            }
        }
    }

    /// Give anonymous foreign-key, check and unique modifiers a name.
    fn name_anonymous(&mut self, table: &str, column: &mut Column) {
        for i in 0..column.modifiers.len() {
            let (kind, suffix, slot) = match &mut column.modifiers[i] {
                ColumnModifier::ForeignKey(fk) => ("fk", "fk", &mut fk.name),
                ColumnModifier::Check(ck) => ("check", "ck", &mut ck.name),
                ColumnModifier::Unique(key) => ("unique", "uq", &mut key.name),
                _ => continue,
            };
            if slot.is_some() {
                continue;
            }
            *slot = Some(format!("{}_{}", column.name, suffix));
            self.warn(
                WarningCode::AnonymousConstraint,
                [kind, table, column.name.as_str()],
            );
        }
    }

    /// Not-null constraints stay unnamed.
    fn anonymize_not_null(&mut self, table: &str, column: &mut Column) {
        for i in 0..column.modifiers.len() {
            if let ColumnModifier::NotNull(nn) = &mut column.modifiers[i] {
                if let Some(name) = nn.name.take() {
                    self.warn(
                        WarningCode::NamedNotNull,
                        [name.as_str(), table, column.name.as_str()],
                    );
                }
            }
        }
    }

    // ---------- best: indexes ----------

    /// Remove indexes whose column tuple is already enforced by a primary
    /// key or unique constraint on the same table.
    fn dedup_indexes(&mut self, script: Script) -> Script {
        let catalog = script.catalog();
        let enforced: HashMap<usize, HashMap<Vec<String>, Enforcer>> = script
            .statements
            .iter()
            .enumerate()
            .filter_map(|(pos, s)| match s {
                Statement::Table(t) => Some((pos, enforcers(t))),
                _ => None,
            })
            .collect();

        let mut slots: Vec<Option<Statement>> = script.statements.into_iter().map(Some).collect();
        for pos in 0..slots.len() {
            let Some(Statement::Index(index)) = &slots[pos] else {
                continue;
            };
            let Some(table_pos) = catalog.table(&index.table) else {
                debug!(index = %index.name, table = %index.table, "index on unknown table");
                continue;
            };
            let key = lowercase(&index.columns);
            let Some(&enforcer) = enforced.get(&table_pos).and_then(|m| m.get(&key)) else {
                continue;
            };
            let Some(Statement::Index(index)) = slots[pos].take() else {
                continue;
            };
            if let Some(Statement::Table(table)) = slots[table_pos].as_mut() {
                let table_name = table.name.clone();
                if let Some(clause) = enforcer.clause_mut(table) {
                    let constraint = clause.name.clone();
                    for m in index.modifiers {
                        clause.modifiers.push(match m {
                            Modifier::Tablespace(ts) => Modifier::IndexTablespace(ts),
                            other => other,
                        });
                    }
                    self.warn(
                        WarningCode::RedundantIndex,
                        [
                            index.name.as_str(),
                            constraint.as_deref().unwrap_or(ANONYMOUS),
                            table_name.as_str(),
                        ],
                    );
                }
            }
        }

        Script::new(slots.into_iter().flatten().collect())
    }
}

/// Where a uniqueness guarantee lives inside a table.
#[derive(Debug, Clone, Copy)]
enum Enforcer {
    Constraint(usize),
    Column { column: usize, modifier: usize },
}

impl Enforcer {
    fn clause_mut(self, table: &mut Table) -> Option<&mut KeyClause> {
        match self {
            Enforcer::Constraint(i) => match table.constraints.get_mut(i)? {
                Constraint::PrimaryKey { key, .. } | Constraint::Unique { key, .. } => Some(key),
                _ => None,
            },
            Enforcer::Column { column, modifier } => {
                match table.columns.get_mut(column)?.modifiers.get_mut(modifier)? {
                    ColumnModifier::PrimaryKey(key) | ColumnModifier::Unique(key) => Some(key),
                    _ => None,
                }
            }
        }
    }
}

fn slot_mut(slots: &mut [Option<Statement>], pos: Option<usize>) -> Option<&mut Statement> {
    slots.get_mut(pos?)?.as_mut()
}

fn lowercase(names: &[String]) -> Vec<String> {
    names.iter().map(|n| n.to_ascii_lowercase()).collect()
}

/// Column tuples with a primary-key or unique guarantee. Column-level
/// constraints win over table-level ones on the same tuple.
fn enforcers(table: &Table) -> HashMap<Vec<String>, Enforcer> {
    let mut map = HashMap::new();
    for (i, c) in table.constraints.iter().enumerate() {
        if let Constraint::PrimaryKey { columns, .. } | Constraint::Unique { columns, .. } = c {
            map.insert(lowercase(columns), Enforcer::Constraint(i));
        }
    }
    for (ci, column) in table.columns.iter().enumerate() {
        for (mi, m) in column.modifiers.iter().enumerate() {
            if matches!(m, ColumnModifier::PrimaryKey(_) | ColumnModifier::Unique(_)) {
                map.insert(
                    vec![column.name.to_ascii_lowercase()],
                    Enforcer::Column {
                        column: ci,
                        modifier: mi,
                    },
                );
            }
        }
    }
    map
}

/// The warning kind and single column of a promotable table constraint.
fn promotion_target(constraint: &Constraint) -> Option<(&'static str, &str)> {
    match constraint {
        Constraint::PrimaryKey { columns, .. } => single(columns).map(|c| ("pk", c)),
        Constraint::ForeignKey { columns, .. } => single(columns).map(|c| ("fk", c)),
        Constraint::Unique { columns, .. } => single(columns).map(|c| ("unique", c)),
        Constraint::Check(ck) => ck.expression.not_null_column().map(|c| ("not null", c)),
    }
}

fn single(columns: &[String]) -> Option<&str> {
    match columns {
        [only] => Some(only),
        _ => None,
    }
}
