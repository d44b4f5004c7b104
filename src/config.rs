use crate::errors::{FileOperation, IoError};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// File looked up next to where the scaffold is invoked.
pub const CONFIG_FILE: &str = "expresso.toml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(expresso::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse toml file at '{path}': {source}")]
    #[diagnostic(code(expresso::config::parse_toml), help("Review toml file"))]
    ParseToml {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Run-wide defaults. Everything the orchestrator would otherwise pull
/// from ambient process state is carried here instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Branch name the repository HEAD is moved to after init.
    pub default_branch: String,
    /// Default author offered at the author prompt.
    pub author: Option<String>,
    /// Package-manager install argv, run inside the target directory.
    pub install_command: Vec<String>,
    /// Extra argv for the typed variant's type-definition install.
    pub typed_install_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_branch: "main".to_string(),
            author: None,
            install_command: vec!["npm".to_string(), "install".to_string()],
            typed_install_command: [
                "npm",
                "install",
                "--save-dev",
                "typescript",
                "ts-node",
                "@types/express",
                "@types/node",
                "@types/pg",
            ]
            .iter()
            .map(|arg| arg.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Loads the config file when present, otherwise falls back to the
    /// built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());

            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let parsed = toml::from_str(&content).map_err(|error| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: error,
        })?;

        Ok(parsed)
    }
}
