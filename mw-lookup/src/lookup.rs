use crate::cleanup::{ArtifactLedger, CleanupReport};
use crate::config::Config;
use crate::fetcher::{FetchConfig, HttpSource};
use crate::launcher::CommandLauncher;
use crate::naming::definition_request;
use crate::parser::parse_entries;
use crate::presenter::{PresentOptions, PresentSummary, Presenter};
use crate::resolver::Resolver;
use crate::traits::{MediaLauncher, RemoteSource};
use crate::types::{DictionaryEntry, LookupError, ResourceResult, Result};
use std::io::Write;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupSummary {
    pub presented: PresentSummary,
    pub cleanup: CleanupReport,
}

/// Looks up one word: definition, optional artifacts, then cleanup.
pub struct WordLookup {
    config: Arc<Config>,
    resolver: Resolver,
    presenter: Presenter,
    launcher: Arc<dyn MediaLauncher>,
}

impl WordLookup {
    pub fn new(config: Config, source: Arc<dyn RemoteSource>, launcher: Arc<dyn MediaLauncher>) -> Self {
        let config = Arc::new(config);
        Self {
            resolver: Resolver::new(source),
            presenter: Presenter::new(Arc::clone(&config), Arc::clone(&launcher)),
            launcher,
            config,
        }
    }

    /// Real network and real external programs.
    pub fn with_defaults(config: Config) -> Result<Self> {
        let source = Arc::new(HttpSource::new(FetchConfig::default())?);
        Ok(Self::new(config, source, Arc::new(CommandLauncher::new())))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves and parses the definition JSON for `word`.
    pub async fn fetch_definition(&self, word: &str, ledger: &mut ArtifactLedger) -> Result<Vec<DictionaryEntry>> {
        let request = definition_request(word, &self.config)?;

        let path = match self.resolver.resolve(&request, &self.config.method_order).await? {
            ResourceResult::Found(path) => path,
            ResourceResult::NotFound => {
                return Err(LookupError::LookupFailure {
                    word: word.to_string(),
                    reason: format!(
                        "definition unavailable (tried {})",
                        self.config.method_order
                    ),
                });
            }
        };
        ledger.record(&path);

        let payload = tokio::fs::read(&path).await?;
        parse_entries(word, &payload)
    }

    /// Runs a full lookup, writing the definitions to `out`.
    ///
    /// Cleanup runs once at the end whether or not the lookup succeeded. Without
    /// retention it waits for open viewers first.
    pub async fn run<W: Write>(&self, word: &str, options: PresentOptions, out: &mut W) -> Result<LookupSummary> {
        info!("Looking up '{}' (methods: {})", word, self.config.method_order);

        let mut ledger = ArtifactLedger::new();
        let outcome = self.lookup(word, options, &mut ledger, out).await;

        // Open viewers still need their image files.
        if !self.config.retain {
            if let Err(e) = self.launcher.settle().await {
                warn!("Could not wait for external programs: {}", e);
            }
        }
        let cleanup = ledger.cleanup(self.config.retain).await;

        match outcome {
            Ok(presented) => {
                info!(
                    "Presented {} entries for '{}' ({} sounds, {} images)",
                    presented.entries, word, presented.sounds_played, presented.images_shown
                );
                Ok(LookupSummary { presented, cleanup })
            }
            Err(e) => {
                error!("Lookup of '{}' failed: {}", word, e);
                Err(e)
            }
        }
    }

    async fn lookup<W: Write>(
        &self,
        word: &str,
        options: PresentOptions,
        ledger: &mut ArtifactLedger,
        out: &mut W,
    ) -> Result<PresentSummary> {
        let entries = self.fetch_definition(word, ledger).await?;
        self.presenter
            .present(&entries, options, &self.resolver, ledger, out)
            .await
    }
}
