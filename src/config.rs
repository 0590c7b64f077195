use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

const DEFAULT_SOURCE_URL: &str = "https://sheetdb.io/api/v1/pnhhegaw3olc5";
const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?tbm=isch&q={code}";

/// Overrides `source.url`
const SOURCE_URL_ENV: &str = "SKUSCAN_SOURCE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub source: SourceConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub display: DisplayConfig,
  #[serde(default)]
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
  /// Endpoint returning the item list as a JSON array
  #[serde(default = "default_source_url")]
  pub url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for SourceConfig {
  fn default() -> Self {
    Self {
      url: default_source_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Database file (defaults to $XDG_DATA_HOME/skuscan/cache.db)
  pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      path: None,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
  #[serde(default = "default_currency")]
  pub currency: String,
  /// Image search link; `{code}` is replaced by the SKU or UPC
  #[serde(default = "default_search_url")]
  pub search_url: String,
}

impl Default for DisplayConfig {
  fn default() -> Self {
    Self {
      currency: default_currency(),
      search_url: default_search_url(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
  /// Filter directive used when RUST_LOG is unset
  #[serde(default = "default_log_level")]
  pub level: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
    }
  }
}

fn default_source_url() -> String {
  DEFAULT_SOURCE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

fn default_true() -> bool {
  true
}

fn default_currency() -> String {
  "₱".to_string()
}

fn default_search_url() -> String {
  DEFAULT_SEARCH_URL.to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./skuscan.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/skuscan/config.yaml
  ///
  /// Without any file the built-in defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    config.with_source_override(std::env::var(SOURCE_URL_ENV).ok())
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("skuscan.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("skuscan").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file deserializes to unit, treat it as all defaults
    if contents.trim().is_empty() {
      return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(contents)?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<()> {
    Url::parse(&self.source.url)
      .map_err(|e| eyre!("Invalid source.url {}: {}", self.source.url, e))?;
    if !self.display.search_url.contains("{code}") {
      return Err(eyre!("display.search_url must contain a {{code}} placeholder"));
    }
    if self.source.timeout_secs == 0 {
      return Err(eyre!("source.timeout_secs must be greater than zero"));
    }
    Ok(())
  }

  /// Replace the endpoint with the value of SKUSCAN_SOURCE_URL, if set.
  fn with_source_override(mut self, raw: Option<String>) -> Result<Self> {
    if let Some(raw) = raw {
      Url::parse(&raw).map_err(|e| eyre!("Invalid {} {}: {}", SOURCE_URL_ENV, raw, e))?;
      self.source.url = raw;
    }
    Ok(self)
  }

  /// Directory for the cache database and log file.
  pub fn data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("skuscan"))
  }

  /// Resolved cache database path.
  pub fn cache_path(&self) -> Result<PathBuf> {
    match &self.cache.path {
      Some(p) => Ok(p.clone()),
      None => Ok(Self::data_dir()?.join("cache.db")),
    }
  }
}
