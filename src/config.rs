use crate::registry::Service;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "dibs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
  #[serde(default = "default_true")]
  pub github: bool,
  #[serde(default = "default_true")]
  pub gopkg: bool,
  #[serde(default = "default_true")]
  pub brew: bool,
  #[serde(default = "default_true")]
  pub npm: bool,
  #[serde(default = "default_true")]
  pub pypi: bool,
  #[serde(default = "default_true")]
  pub rubygems: bool,
  #[serde(default = "default_true")]
  pub crates: bool,
  #[serde(default = "default_true")]
  pub packagist: bool,
}

fn default_true() -> bool {
  true
}

impl Default for RegistrySettings {
  fn default() -> Self {
    Self {
      github: true,
      gopkg: true,
      brew: true,
      npm: true,
      pypi: true,
      rubygems: true,
      crates: true,
      packagist: true,
    }
  }
}

impl RegistrySettings {
  fn allows(&self, service: Service) -> bool {
    match service {
      Service::GitHub => self.github,
      Service::GoPkg => self.gopkg,
      Service::Brew => self.brew,
      Service::Npm => self.npm,
      Service::PyPi => self.pypi,
      Service::RubyGems => self.rubygems,
      Service::Crates => self.crates,
      Service::Packagist => self.packagist,
    }
  }

  /// The services a run fans out to, in the fixed registry order
  pub fn enabled(&self) -> Vec<Service> {
    Service::ALL
      .into_iter()
      .filter(|service| self.allows(*service))
      .collect()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
  #[serde(default)]
  pub registries: RegistrySettings,
}

impl Config {
  fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
  }

  /// Load config from file; absent file means defaults
  pub fn load() -> Result<Self> {
    let path =
      Self::config_path().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }
}
