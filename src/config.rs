//! `chameleon.toml` configuration.
//!
//! ```toml
//! dialect = "postgres"
//! optimizer = "best"
//! sort = true
//! deferrable = false
//! header = "etc/header.sql"
//! ```
//!
//! Command-line flags override every value read here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChameleonError, ChameleonResult};
use crate::optimizer::Level;
use crate::transpiler::{Dialect, RenderOptions};

/// Name of the per-project configuration file.
pub const FILE_NAME: &str = "chameleon.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub dialect: Dialect,
    pub optimizer: Level,
    pub sort: bool,
    pub deferrable: bool,
    /// File prepended to every rendered output.
    pub header: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(content: &str) -> ChameleonResult<Self> {
        toml::from_str(content).map_err(|e| ChameleonError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> ChameleonResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| ChameleonError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `explicit` if given, otherwise the first of `./chameleon.toml`
    /// and the user config file that exists. Falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> ChameleonResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::candidates().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Implicit lookup locations, in order.
    pub fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("chameleon").join("config.toml"));
        }
        paths
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            sort: self.sort,
            deferrable: self.deferrable,
        }
    }

    /// The header file's content, or an empty string when none is set.
    pub fn header_text(&self) -> ChameleonResult<String> {
        match &self.header {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => Ok(String::new()),
        }
    }
}
