use crate::types::{LookupError, Method, MethodOrder, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_PLAYER: &str = "mplayer";
pub const DEFAULT_VIEWER: &str = "gthumb";
pub const DEFAULT_PLAYBACK_PAUSE_MS: u64 = 250;

/// Provider endpoints. Only the collegiate reference is supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub image_base: String,
    pub audio_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: "https://www.dictionaryapi.com/api/v3/references/collegiate/json/"
                .to_string(),
            image_base: "https://www.merriam-webster.com/assets/mw/static/art/dict/".to_string(),
            audio_base: "https://media.merriam-webster.com/soundc11/".to_string(),
        }
    }
}

/// The on-disk JSON config (`~/.mwrc` by default). Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub player: Option<String>,
    pub viewer: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub key: Option<String>,
    pub retain: Option<bool>,
    pub methods: Option<Vec<Method>>,
    pub playback_pause_ms: Option<u64>,
}

impl ConfigFile {
    /// Reads the config file. A file that does not exist yields an empty config.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(LookupError::Config {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        Self::parse(&content).map_err(|e| LookupError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Values supplied on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub retain: bool,
    pub disk_first: bool,
    pub methods: Option<MethodOrder>,
    pub cache_dir: Option<PathBuf>,
}

/// Fully resolved options for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub player: String,
    pub viewer: String,
    pub cache_dir: PathBuf,
    pub api_key: String,
    pub retain: bool,
    pub method_order: MethodOrder,
    pub playback_pause: Duration,
    pub endpoints: Endpoints,
}

impl Config {
    pub fn resolve(file: ConfigFile, overrides: ConfigOverrides) -> Result<Self> {
        let api_key = file
            .key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(LookupError::MissingApiKey)?;

        let method_order = match (overrides.methods, overrides.disk_first, file.methods) {
            (Some(order), _, _) => order,
            (None, true, _) => MethodOrder::disk_first(),
            (None, false, Some(methods)) => MethodOrder::new(methods)?,
            (None, false, None) => MethodOrder::default(),
        };

        let cache_dir = overrides
            .cache_dir
            .or(file.cache_dir)
            .unwrap_or_else(default_cache_dir);

        Ok(Self {
            player: file.player.unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
            viewer: file.viewer.unwrap_or_else(|| DEFAULT_VIEWER.to_string()),
            cache_dir,
            api_key,
            retain: overrides.retain || file.retain.unwrap_or(false),
            method_order,
            playback_pause: Duration::from_millis(
                file.playback_pause_ms.unwrap_or(DEFAULT_PLAYBACK_PAUSE_MS),
            ),
            endpoints: Endpoints::default(),
        })
    }

    /// Minimal config for a given key and cache directory, everything else defaulted.
    pub fn new(api_key: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let file = ConfigFile {
            key: Some(api_key.into()),
            cache_dir: Some(cache_dir.into()),
            ..Default::default()
        };
        Self::resolve(file, ConfigOverrides::default())
    }

    pub fn with_method_order(mut self, order: MethodOrder) -> Self {
        self.method_order = order;
        self
    }

    pub fn with_retain(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }

    pub fn with_playback_pause(mut self, pause: Duration) -> Self {
        self.playback_pause = pause;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    home_dir().join(".mwrc")
}

pub fn default_cache_dir() -> PathBuf {
    home_dir().join(".mw")
}
