use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ast::{DataType, NodeKind};
use crate::transpiler::sql::oracle::OracleDialect;
use crate::transpiler::sql::postgres::PostgresDialect;
use crate::transpiler::{Handler, ORDERING};

/// What a target dialect supplies to the renderer.
pub trait DdlDialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// The complete handler table. [`Renderer::new`](super::Renderer::new)
    /// rejects a table that leaves any [`NodeKind`] unmapped.
    fn handlers(&self) -> HashMap<NodeKind, Handler>;

    /// Precedence used when output is sorted.
    fn ordering(&self) -> &'static [NodeKind] {
        ORDERING
    }

    /// Map a column type written for the other dialect onto this one.
    /// Types this dialect already understands come back unchanged.
    fn translate_type(&self, data_type: &DataType) -> DataType;

    /// Map a bare literal (keyword, sequence call, quoted string).
    fn translate_literal(&self, literal: &str) -> String;

    /// Whether the `deferrable` render option applies to foreign keys.
    fn honors_deferrable(&self) -> bool {
        false
    }
}

/// Supported target dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Oracle,
    Postgres,
}

impl Dialect {
    pub fn generator(&self) -> Box<dyn DdlDialect> {
        match self {
            Dialect::Oracle => Box::new(OracleDialect),
            Dialect::Postgres => Box::new(PostgresDialect),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Oracle => "oracle",
            Dialect::Postgres => "postgres",
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oracle" => Ok(Dialect::Oracle),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            _ => Err(format!("style \"{}\", not-valid (oracle|postgres)", s)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
