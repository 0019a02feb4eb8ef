use std::path::{Path, PathBuf};

use anyhow::Context;
use directories_next::ProjectDirs;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backends: Vec<Backend>,
    pub upload: Upload,
    pub log: Log,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Backend {
    pub name: String,
    pub endpoint: Url,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Upload {
    pub user_agent: String,
    pub anonymize_file_names: bool,
    pub copy_to_clipboard: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Log {
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backends: vec![Backend::zero_x_zero()],
            upload: Upload::default(),
            log: Log::default(),
        }
    }
}

impl Default for Upload {
    fn default() -> Self {
        Upload {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
            anonymize_file_names: false,
            copy_to_clipboard: true,
        }
    }
}

impl Default for Log {
    fn default() -> Self {
        Log {
            filter: "info".to_owned(),
        }
    }
}

impl Backend {
    /// The built-in backend, <https://0x0.st>.
    pub fn zero_x_zero() -> Self {
        Backend {
            name: "0x0".to_owned(),
            endpoint: Url::parse("https://0x0.st").expect("static url is valid"),
        }
    }
}

/// `config.toml` in the per-user config directory.
pub fn default_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("st", "0x0", env!("CARGO_PKG_NAME"))?;
    Some(dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Load the config file at `path`, or the defaults if it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Config::parse(&source).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn parse(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
