use crate::traits::MediaLauncher;
use crate::types::{LookupError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Runs the configured player and viewer as child processes.
///
/// The command string may carry extra arguments (`"mplayer -really-quiet"`); the
/// artifact path is appended last. Output is discarded so it does not mix with
/// the printed definitions. Viewers keep running in the background until
/// `settle` is called.
#[derive(Debug, Default)]
pub struct CommandLauncher {
    viewers: Mutex<Vec<Child>>,
}

impl CommandLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    fn command(command_line: &str, path: &Path) -> Result<Command> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| LookupError::Transport("empty external command".to_string()))?;

        let mut command = Command::new(program);
        command
            .args(parts)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(command)
    }
}

#[async_trait]
impl MediaLauncher for CommandLauncher {
    async fn play(&self, player: &str, path: &Path) -> Result<()> {
        debug!("Playing {} with {}", path.display(), player);
        let status = Self::command(player, path)?.status().await?;

        if !status.success() {
            debug!("{} exited with {}", player, status);
        }
        Ok(())
    }

    async fn view(&self, viewer: &str, path: &Path) -> Result<()> {
        debug!("Opening {} with {}", path.display(), viewer);
        let child = Self::command(viewer, path)?.spawn()?;
        self.viewers.lock().await.push(child);
        Ok(())
    }

    async fn settle(&self) -> Result<()> {
        let viewers: Vec<Child> = self.viewers.lock().await.drain(..).collect();
        if !viewers.is_empty() {
            debug!("Waiting for {} viewer(s) to close", viewers.len());
        }

        for mut child in viewers {
            match child.wait().await {
                Ok(status) if !status.success() => debug!("Viewer exited with {}", status),
                Ok(_) => {}
                Err(e) => warn!("Could not wait for viewer: {}", e),
            }
        }
        Ok(())
    }
}
