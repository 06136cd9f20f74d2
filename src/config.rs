// ABOUTME: Configuration structures and parsing for the sshconfig command-line tool
// ABOUTME: Locates the SSH config files to read and chooses how parsed hosts are printed

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub ssh: SshConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SshConfig {
    pub config_path: String,
    #[serde(default = "default_fragment_dir")]
    pub fragment_dir: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Toml,
}

fn default_fragment_dir() -> String {
    "~/.ssh/config.d".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ssh: SshConfig {
                config_path: "~/.ssh/config".to_string(),
                fragment_dir: default_fragment_dir(),
            },
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn default_config_content() -> &'static str {
        r#"# sshconfig Configuration

[ssh]
# Canonical SSH client config, read last
config_path = "~/.ssh/config"
# Every file in this directory is read first, in file name order
fragment_dir = "~/.ssh/config.d"

[output]
# "table" or "toml"
format = "table"
"#
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::load_from_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("no configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?;
        Ok(config_dir.join("sshconfig").join("config.toml"))
    }

    pub fn expand_path(&mut self) -> Result<()> {
        self.ssh.config_path = expand_tilde(&self.ssh.config_path)?;
        self.ssh.fragment_dir = expand_tilde(&self.ssh.fragment_dir)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.ssh.config_path.is_empty() {
            anyhow::bail!("SSH config path cannot be empty");
        }

        if self.ssh.fragment_dir.is_empty() {
            anyhow::bail!("SSH fragment directory cannot be empty");
        }

        Ok(())
    }

    /// Files to read, in order, after `expand_path`.
    pub fn ssh_files(&self) -> Vec<PathBuf> {
        crate::ssh::config_files(
            Path::new(&self.ssh.fragment_dir),
            Path::new(&self.ssh.config_path),
        )
    }

    pub fn save_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write default config to: {}", path.display()))?;

        Ok(())
    }
}

fn expand_tilde(path: &str) -> Result<String> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir()
            .context("Failed to determine home directory")?;
        Ok(home.join(rest).to_string_lossy().into_owned())
    } else {
        Ok(path.to_string())
    }
}
