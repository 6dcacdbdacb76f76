use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bookswap")]
#[command(about = "Runs the bookswap listings service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookswap")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

// Used when no config file exists, so a bare environment is enough to run.
const DEFAULT_CONFIG: &str = r#"
app:
  port: ${PORT:-8000}
store:
  kind: ${BOOKSWAP_STORE:-remote}
  url: "${BOOKSWAP_DB_URL:-}"
  auth_token: "${BOOKSWAP_DB_TOKEN:-}"
"#;

pub fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:3001",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:3001",
        "http://localhost:8000",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_port() -> u16 {
    8000
}

fn default_table() -> String {
    "books".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for App {
    fn default() -> Self {
        App {
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Remote,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Store {
    #[serde(default)]
    pub kind: StoreKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            kind: StoreKind::default(),
            url: String::new(),
            auth_token: String::new(),
            table: default_table(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub store: Store,
}

impl Config {
    /// Loads the config at `path`, falling back to environment-driven
    /// defaults when the file does not exist.
    pub fn new(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = ?path, "config file not found, using defaults");
            return Config::from_yaml(DEFAULT_CONFIG);
        }

        let yaml_str =
            fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
        Config::from_yaml(&yaml_str)
    }

    fn from_yaml(yaml_str: &str) -> Result<Config> {
        let yaml_with_env = Config::substitute_vars(yaml_str, |name| env::var(name).ok());
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    fn substitute_vars(yaml_str: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            let Some(end) = result[actual_start..].find('}') else {
                break;
            };
            let var_name = &result[actual_start + 2..actual_start + end];

            // ${VAR:-default}
            let value = match var_name.split_once(":-") {
                Some((name, default_val)) => lookup(name).unwrap_or_else(|| default_val.to_string()),
                None => lookup(var_name).unwrap_or_else(|| {
                    tracing::warn!("environment variable '{}' not found", var_name);
                    String::new()
                }),
            };

            result.replace_range(actual_start..actual_start + end + 1, &value);
            offset = actual_start + value.len();
        }

        result
    }
}
