//! Background trash sweep for Cubby.
//!
//! This module provides the background task that periodically purges
//! trash entries older than the retention window.

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use super::service::{now_ms, FileService};

/// Default sweep interval in seconds (24 hours).
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Trash purge background sweeper.
///
/// This struct manages a background task that periodically removes
/// expired trash entries via [`FileService::purge`].
pub struct TrashSweeper {
    service: Arc<FileService>,
    sweep_interval: Duration,
}

impl TrashSweeper {
    /// Create a new TrashSweeper with the default interval.
    pub fn new(service: Arc<FileService>) -> Self {
        Self {
            service,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }

    /// Create a new TrashSweeper with a custom sweep interval.
    pub fn with_interval(service: Arc<FileService>, interval_secs: u64) -> Self {
        Self {
            service,
            sweep_interval: Duration::from_secs(interval_secs),
        }
    }

    /// Run the sweeper loop.
    ///
    /// This method runs indefinitely, purging expired trash entries at
    /// the configured interval. The first immediate tick is skipped so a
    /// fresh start doesn't sweep right away.
    pub async fn run(&self) {
        info!(
            "Trash sweeper started (interval: {} seconds)",
            self.sweep_interval.as_secs()
        );

        let mut timer = interval(self.sweep_interval);

        // Skip the first immediate tick
        timer.tick().await;

        loop {
            timer.tick().await;
            self.sweep_once();
        }
    }

    /// Run a single sweep against the current wall clock.
    fn sweep_once(&self) {
        match self.service.purge(now_ms()) {
            Ok(count) => {
                if count > 0 {
                    info!(removed_count = count, "Purged expired trash entries");
                } else {
                    debug!("No expired trash entries to purge");
                }
            }
            Err(e) => {
                warn!(error = %e, "Trash sweep failed");
            }
        }
    }

    /// Spawn the sweeper onto the runtime.
    pub fn spawn(service: Arc<FileService>, interval_secs: u64) {
        let sweeper = Self::with_interval(service, interval_secs);
        tokio::spawn(async move {
            sweeper.run().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<FileService>) {
        let temp_dir = TempDir::new().unwrap();
        let service = Arc::new(
            FileService::new(
                temp_dir.path().join("files"),
                temp_dir.path().join("trash"),
            )
            .unwrap(),
        );
        (temp_dir, service)
    }

    #[test]
    fn test_with_interval() {
        let (_temp_dir, service) = setup();

        let sweeper = TrashSweeper::with_interval(service, 60);

        assert_eq!(sweeper.sweep_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_sweep_once_removes_expired() {
        let (_temp_dir, service) = setup();

        // An entry stamped far in the past is expired against any wall clock.
        service.create("ancient.txt", b"data").unwrap();
        service.delete_at("ancient.txt", 1000).unwrap();

        let sweeper = TrashSweeper::new(service.clone());
        sweeper.sweep_once();

        assert!(service.trash().list_stamped().unwrap().is_empty());
    }

    #[test]
    fn test_sweep_once_keeps_fresh_entries() {
        let (_temp_dir, service) = setup();

        service.create("fresh.txt", b"data").unwrap();
        let stamped = service.delete("fresh.txt").unwrap();

        let sweeper = TrashSweeper::new(service.clone());
        sweeper.sweep_once();

        assert!(service.trash().exists(&stamped));
    }
}
