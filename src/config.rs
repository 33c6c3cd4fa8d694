use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "gallery")]
#[command(about = "Serves a folder of images and videos as a click-to-enlarge gallery", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    /// Overrides `app.port`
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Overrides `app.media_dir`
    #[arg(short = 'm', long = "media-dir")]
    pub media_dir: Option<PathBuf>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gallery")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct App {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_media_dir")]
    media_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("static/images")
}

impl Default for App {
    fn default() -> Self {
        App {
            host: default_host(),
            port: default_port(),
            media_dir: default_media_dir(),
        }
    }
}

impl App {
    pub fn get_host(&self) -> &str {
        return &self.host;
    }

    pub fn get_port(&self) -> u16 {
        return self.port;
    }

    pub fn get_media_dir(&self) -> &PathBuf {
        return &self.media_dir;
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub app: App,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let cfg = Config::load_config(path)?;
        Ok(cfg)
    }

    /// Resolves the configuration for a run: the file named on the command
    /// line must exist, the default file is optional, and flags win over both.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut cfg = match &cli.config_path {
            Some(path) => Config::new(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    Config::new(&path.to_string_lossy())?
                } else {
                    tracing::info!(path = ?path, "no config file, using defaults");
                    Config::default()
                }
            }
        };

        if let Some(port) = cli.port {
            cfg.app.port = port;
        }
        if let Some(dir) = &cli.media_dir {
            cfg.app.media_dir = dir.clone();
        }
        Ok(cfg)
    }

    fn load_config(path: &str) -> Result<Config> {
        let yaml_str = fs::read_to_string(path).with_context(|| format!("reading config file {}", path))?;
        let yaml_with_env = Config::substitute_env_vars(&yaml_str)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env).with_context(|| format!("parsing config file {}", path))?;
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            let Some(end) = result[actual_start..].find('}') else {
                break;
            };
            let expr = &result[actual_start + 2..actual_start + end];

            // ${VAR:-default}
            let value = match expr.split_once(":-") {
                Some((var, default)) => env::var(var).unwrap_or_else(|_| default.to_string()),
                None => env::var(expr).unwrap_or_else(|_| {
                    tracing::warn!(var = expr, "environment variable not found");
                    String::new()
                }),
            };

            result.replace_range(actual_start..actual_start + end + 1, &value);
            offset = actual_start + value.len();
        }

        Ok(result)
    }
}
