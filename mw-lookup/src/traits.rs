use crate::types::Result;
use async_trait::async_trait;
use std::path::Path;

/// A raw response from a remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Trait for issuing GET requests against the dictionary provider.
///
/// An `Err` means the request never produced a status (DNS, refused connection,
/// timeout). The resolver treats that the same as a non-200 answer.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Human-readable name for logs
    fn source_name(&self) -> String;

    /// Fetch `url` and return its status and body
    async fn get(&self, url: &str) -> Result<RemoteResponse>;
}

/// Trait for handing artifacts to external programs.
#[async_trait]
pub trait MediaLauncher: Send + Sync {
    /// Play an audio file and wait for the player to exit
    async fn play(&self, player: &str, path: &Path) -> Result<()>;

    /// Open an image; does not wait for the viewer
    async fn view(&self, viewer: &str, path: &Path) -> Result<()>;

    /// Wait for every viewer opened so far to exit. Called before non-retained
    /// artifacts are deleted.
    async fn settle(&self) -> Result<()>;
}
