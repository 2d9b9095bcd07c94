use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A way of obtaining an artifact: read it from the cache directory or fetch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Disk,
    Net,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Disk => write!(f, "disk"),
            Method::Net => write!(f, "net"),
        }
    }
}

impl FromStr for Method {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disk" => Ok(Method::Disk),
            "net" => Ok(Method::Net),
            other => Err(LookupError::InvalidMethod(other.to_string())),
        }
    }
}

/// Preference order the resolver walks. Never empty, no method repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOrder(Vec<Method>);

impl MethodOrder {
    pub fn new(methods: Vec<Method>) -> Result<Self> {
        if methods.is_empty() {
            return Err(LookupError::InvalidMethodOrder(
                "at least one method is required".to_string(),
            ));
        }

        for (i, method) in methods.iter().enumerate() {
            if methods[..i].contains(method) {
                return Err(LookupError::InvalidMethodOrder(format!(
                    "method '{}' listed more than once",
                    method
                )));
            }
        }

        Ok(Self(methods))
    }

    /// Freshness first: always ask the network, fall back to whatever is cached.
    pub fn net_first() -> Self {
        Self(vec![Method::Net, Method::Disk])
    }

    /// Cache first: only hit the network when nothing is cached.
    pub fn disk_first() -> Self {
        Self(vec![Method::Disk, Method::Net])
    }

    pub fn methods(&self) -> &[Method] {
        &self.0
    }
}

impl Default for MethodOrder {
    fn default() -> Self {
        Self::net_first()
    }
}

impl FromStr for MethodOrder {
    type Err = LookupError;

    /// Parses a comma separated list such as `disk,net`.
    fn from_str(s: &str) -> Result<Self> {
        let methods = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Method::from_str)
            .collect::<Result<Vec<_>>>()?;
        Self::new(methods)
    }
}

impl fmt::Display for MethodOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", names.join(","))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Definition,
    Audio,
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Definition => write!(f, "definition"),
            ResourceKind::Audio => write!(f, "audio"),
            ResourceKind::Image => write!(f, "image"),
        }
    }
}

/// One fetchable artifact: where it lives in the cache and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub kind: ResourceKind,
    pub local_path: PathBuf,
    pub remote_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceResult {
    Found(PathBuf),
    NotFound,
}

impl ResourceResult {
    pub fn is_found(&self) -> bool {
        matches!(self, ResourceResult::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ResourceResult::Found(path) => Some(path),
            ResourceResult::NotFound => None,
        }
    }
}

/// One headword sense as returned by the collegiate API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: String,
    pub short_definitions: Vec<String>,
    pub audio_id: Option<String>,
    pub image_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Merriam-Webster API key is missing")]
    MissingApiKey,

    #[error("Invalid word: {0:?}")]
    InvalidWord(String),

    #[error("Unknown resolution method: {0:?} (expected 'disk' or 'net')")]
    InvalidMethod(String),

    #[error("Invalid method order: {0}")]
    InvalidMethodOrder(String),

    #[error("Lookup of '{word}' failed: {reason}")]
    LookupFailure { word: String, reason: String },

    #[error("Config error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, LookupError>;
