use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::BudgetError;

const DEFAULT_PORT: u16 = 3000;

/// Server configuration, loaded from an optional `config.json` in the app
/// root. Missing file means defaults; a malformed file is a hard error so a
/// typo cannot silently fall back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
    /// App root for the document store; `None` resolves to `~/.troskovnik`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_root: Option<PathBuf>,
    #[serde(default = "ServerConfig::default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_root: None,
            public_dir: Self::default_public_dir(),
        }
    }
}

impl ServerConfig {
    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_public_dir() -> PathBuf {
        PathBuf::from("public")
    }

    pub fn load() -> Result<Self, BudgetError> {
        Self::load_from_root(crate::utils::app_data_dir())
    }

    pub fn load_from_root(root: PathBuf) -> Result<Self, BudgetError> {
        let path = crate::utils::config_file_in(&root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
