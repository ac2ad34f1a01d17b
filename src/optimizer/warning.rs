//! Structured optimizer warnings.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Placeholder for a constraint that has no name.
pub const ANONYMOUS: &str = "<anonymous>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WarningCode {
    AlterTablePromoted,
    AlterIndexPromoted,
    AnonymousConstraint,
    NamedNotNull,
    RedundantNotNull,
    RedundantUnique,
    TableConstraintPromoted,
    RedundantIndex,
}

impl WarningCode {
    pub fn code(&self) -> u16 {
        match self {
            WarningCode::AlterTablePromoted => 1,
            WarningCode::AlterIndexPromoted => 2,
            WarningCode::AnonymousConstraint => 10,
            WarningCode::NamedNotNull => 20,
            WarningCode::RedundantNotNull => 30,
            WarningCode::RedundantUnique => 31,
            WarningCode::TableConstraintPromoted => 40,
            WarningCode::RedundantIndex => 50,
        }
    }

    /// One-line description used in the summary report.
    pub fn summary(&self) -> &'static str {
        match self {
            WarningCode::AlterTablePromoted => "Alter Table (promoted)",
            WarningCode::AlterIndexPromoted => "Alter Index (promoted)",
            WarningCode::AnonymousConstraint => "Anonymous constraint (name needed)",
            WarningCode::NamedNotNull => "Named (not null) constraint (should be anonymous)",
            WarningCode::RedundantNotNull => "Redundant (not null) w/ (primary key)",
            WarningCode::RedundantUnique => "Redundant (unique) w/ (primary key)",
            WarningCode::TableConstraintPromoted => "Table constraint (promoted)",
            WarningCode::RedundantIndex => "Index redundant w/ (pk,unique) constraint, removed",
        }
    }

    /// Message template; each `{}` takes the next argument.
    fn template(&self) -> &'static str {
        match self {
            WarningCode::AlterTablePromoted => {
                "ALTER TABLE \"{}\" has been optimized into the \"CREATE TABLE\" declaration."
            }
            WarningCode::AlterIndexPromoted => {
                "ALTER INDEX \"{}\" has been optimized into the \"CREATE INDEX\" declaration."
            }
            WarningCode::AnonymousConstraint => {
                "Anonymous ({}) constraint on \"{}.{}\" has been named."
            }
            WarningCode::NamedNotNull => {
                "The named (not null) constraint \"{}\" on \"{}.{}\" has been made anonymous."
            }
            WarningCode::RedundantNotNull => {
                "The (not null) constraint on \"{}.{}\" has been removed because it is redundant with the (primary key)."
            }
            WarningCode::RedundantUnique => {
                "The (unique) constraint \"{}\" on \"{}.{}\" has been removed because it is redundant with the (primary key)."
            }
            WarningCode::TableConstraintPromoted => {
                "The ({}) table constraint \"{}\" on \"{}\" has been promoted to the \"{}\" column."
            }
            WarningCode::RedundantIndex => {
                "Index ({}) is redundant with constraint \"{}\" on \"{}\", removed."
            }
        }
    }
}

/// A coded record of one rewrite, carrying the names it affected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub code: WarningCode,
    pub args: Vec<String>,
}

impl Warning {
    pub fn new<I, S>(code: WarningCode, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut args = self.args.iter();
        let mut parts = self.code.template().split("{}");
        if let Some(first) = parts.next() {
            f.write_str(first)?;
        }
        for part in parts {
            f.write_str(args.next().map_or("", String::as_str))?;
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// Per-code counts, ordered by code: `   3: Anonymous constraint (name needed)`.
pub fn report(warnings: &[Warning]) -> String {
    let mut counts: BTreeMap<u16, (usize, &'static str)> = BTreeMap::new();
    for w in warnings {
        counts.entry(w.code.code()).or_insert((0, w.code.summary())).0 += 1;
    }
    counts
        .values()
        .map(|(count, summary)| format!("{:>4}: {}", count, summary))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fills_template() {
        let w = Warning::new(
            WarningCode::TableConstraintPromoted,
            ["pk", "t_pk", "t", "id"],
        );
        assert_eq!(
            w.to_string(),
            "The (pk) table constraint \"t_pk\" on \"t\" has been promoted to the \"id\" column."
        );
    }

    #[test]
    fn test_report_counts_by_code() {
        let warnings = vec![
            Warning::new(WarningCode::RedundantIndex, ["i", "c", "t"]),
            Warning::new(WarningCode::AnonymousConstraint, ["fk", "t", "a"]),
            Warning::new(WarningCode::AnonymousConstraint, ["check", "t", "b"]),
        ];
        assert_eq!(
            report(&warnings),
            "   2: Anonymous constraint (name needed)\n   1: Index redundant w/ (pk,unique) constraint, removed"
        );
    }
}
