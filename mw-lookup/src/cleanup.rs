use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Artifacts resolved during one run, in resolution order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct ArtifactLedger {
    paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: usize,
    pub missing: usize,
    pub failed: usize,
    pub retained: usize,
}

impl ArtifactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: &Path) {
        if !self.paths.iter().any(|p| p == path) {
            self.paths.push(path.to_path_buf());
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Deletes every recorded artifact unless `retain` is set.
    ///
    /// Files that are already gone are counted as missing. Other failures are logged
    /// and counted; cleanup itself never fails the run.
    pub async fn cleanup(&self, retain: bool) -> CleanupReport {
        let mut report = CleanupReport::default();

        if retain {
            report.retained = self.paths.len();
            debug!("Retaining {} cached artifacts", report.retained);
            return report;
        }

        for path in &self.paths {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {
                    debug!("Deleted {}", path.display());
                    report.removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    report.missing += 1;
                }
                Err(e) => {
                    warn!("Could not delete {}: {}", path.display(), e);
                    report.failed += 1;
                }
            }
        }

        if report.removed > 0 {
            info!("Removed {} cached artifacts", report.removed);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deduplicates_in_order() {
        let mut ledger = ArtifactLedger::new();
        ledger.record(Path::new("/c/a.wav"));
        ledger.record(Path::new("/c/b.gif"));
        ledger.record(Path::new("/c/a.wav"));

        assert_eq!(
            ledger.paths(),
            &[PathBuf::from("/c/a.wav"), PathBuf::from("/c/b.gif")]
        );
    }

    #[tokio::test]
    async fn test_cleanup_deletes_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("run.json");
        let gone = dir.path().join("run01.wav");
        std::fs::write(&present, "[]").unwrap();

        let mut ledger = ArtifactLedger::new();
        ledger.record(&present);
        ledger.record(&gone);

        let report = ledger.cleanup(false).await;
        assert_eq!(report.removed, 1);
        assert_eq!(report.missing, 1);
        assert_eq!(report.failed, 0);
        assert!(!present.exists());

        // Running it again is harmless.
        let report = ledger.cleanup(false).await;
        assert_eq!(report.removed, 0);
        assert_eq!(report.missing, 2);
    }

    #[tokio::test]
    async fn test_cleanup_retains() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heart.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let mut ledger = ArtifactLedger::new();
        ledger.record(&path);

        let report = ledger.cleanup(true).await;
        assert_eq!(report.retained, 1);
        assert_eq!(report.removed, 0);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_cleanup_counts_undeletable_entries() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be removed with remove_file.
        let sub = dir.path().join("not-a-file.json");
        std::fs::create_dir(&sub).unwrap();

        let mut ledger = ArtifactLedger::new();
        ledger.record(&sub);

        let report = ledger.cleanup(false).await;
        assert_eq!(report.failed, 1);
        assert!(sub.exists());
    }
}
