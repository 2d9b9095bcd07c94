use crate::cleanup::ArtifactLedger;
use crate::config::Config;
use crate::naming::{audio_request, image_request};
use crate::resolver::Resolver;
use crate::traits::MediaLauncher;
use crate::types::{DictionaryEntry, ResourceRequest, ResourceResult, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// What to do with each entry besides printing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentOptions {
    pub sound: bool,
    pub pictures: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentSummary {
    pub entries: usize,
    pub sounds_played: usize,
    pub images_shown: usize,
}

pub struct Presenter {
    config: Arc<Config>,
    launcher: Arc<dyn MediaLauncher>,
}

impl Presenter {
    pub fn new(config: Arc<Config>, launcher: Arc<dyn MediaLauncher>) -> Self {
        Self { config, launcher }
    }

    /// Prints every entry in order, playing and showing artifacts as requested.
    pub async fn present<W: Write>(
        &self,
        entries: &[DictionaryEntry],
        options: PresentOptions,
        resolver: &Resolver,
        ledger: &mut ArtifactLedger,
        out: &mut W,
    ) -> Result<PresentSummary> {
        let mut summary = PresentSummary::default();

        for entry in entries {
            write_entry(entry, out)?;
            out.flush()?;
            summary.entries += 1;

            if options.sound {
                if let Some(audio_id) = &entry.audio_id {
                    if let Some(path) = self
                        .resolve(resolver, audio_request(audio_id, &self.config), ledger)
                        .await?
                    {
                        match self.launcher.play(&self.config.player, &path).await {
                            Ok(()) => summary.sounds_played += 1,
                            Err(e) => warn!("Could not play {}: {}", path.display(), e),
                        }
                        if !self.config.playback_pause.is_zero() {
                            tokio::time::sleep(self.config.playback_pause).await;
                        }
                    }
                }
            }

            if options.pictures {
                if let Some(image_id) = &entry.image_id {
                    if let Some(path) = self
                        .resolve(resolver, image_request(image_id, &self.config), ledger)
                        .await?
                    {
                        match self.launcher.view(&self.config.viewer, &path).await {
                            Ok(()) => summary.images_shown += 1,
                            Err(e) => warn!("Could not open {}: {}", path.display(), e),
                        }
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Optional artifacts never fail the run: an id that cannot name a cache file is
    /// skipped like one that could not be fetched. Cache write errors still propagate.
    async fn resolve(
        &self,
        resolver: &Resolver,
        request: Result<ResourceRequest>,
        ledger: &mut ArtifactLedger,
    ) -> Result<Option<PathBuf>> {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                warn!("Skipping artifact: {}", e);
                return Ok(None);
            }
        };

        match resolver.resolve(&request, &self.config.method_order).await? {
            ResourceResult::Found(path) => {
                ledger.record(&path);
                Ok(Some(path))
            }
            ResourceResult::NotFound => {
                debug!("Skipping {}, {} not available", request.kind, request.local_path.display());
                Ok(None)
            }
        }
    }
}

/// `id` on its own line, then one ` -- ` line per short definition.
pub fn write_entry<W: Write>(entry: &DictionaryEntry, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", entry.id)?;
    for definition in &entry.short_definitions {
        writeln!(out, " -- {}", definition)?;
    }
    Ok(())
}
