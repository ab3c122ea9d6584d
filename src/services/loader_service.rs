use crate::data::roster::Roster;
use crate::persistence::{self, KeyValueStore};
use crate::services::source::{RosterSource, SAMPLE_ROSTER};
use crate::session::RosterSession;
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Service responsible for getting a roster into a session.
/// Fetching, fallback and persistence live here, not in the session.
pub struct RosterLoaderService {
    fallback_to_sample: bool,
    persist_on_load: bool,
}

/// Result of loading a roster
#[derive(Debug)]
pub struct RosterLoadResult {
    pub roster: Roster,
    /// Where the text actually came from
    pub source: RosterSource,
    pub used_fallback: bool,
    pub load_time: Duration,
}

impl RosterLoadResult {
    pub fn status_message(&self) -> String {
        let mut message = format!(
            "Loaded {} people from {} in {:.2}ms",
            self.roster.len(),
            self.source,
            self.load_time.as_secs_f64() * 1000.0
        );
        if self.used_fallback {
            message.push_str(" (source unavailable, showing sample data)");
        }
        message
    }
}

impl RosterLoaderService {
    pub fn new(fallback_to_sample: bool, persist_on_load: bool) -> Self {
        Self {
            fallback_to_sample,
            persist_on_load,
        }
    }

    /// Fetch and validate a roster. An unreachable source falls back to the
    /// bundled sample when enabled; malformed CSV never does.
    pub async fn load(&self, source: &RosterSource) -> Result<RosterLoadResult> {
        let start = Instant::now();

        let (text, actual_source, used_fallback) = match source.fetch_text().await {
            Ok(text) => (text, source.clone(), false),
            Err(e) if e.is_source_unavailable() && self.fallback_to_sample => {
                warn!("{}; falling back to sample roster", e);
                (SAMPLE_ROSTER.to_string(), RosterSource::Sample, true)
            }
            Err(e) => return Err(e.into()),
        };

        let roster = Roster::from_csv(&text)?;
        Ok(RosterLoadResult {
            roster,
            source: actual_source,
            used_fallback,
            load_time: start.elapsed(),
        })
    }

    /// Load into `session`, saving a snapshot to `store` when configured.
    /// The session is only touched once the roster is fully validated. A
    /// failed snapshot write is logged and does not block the load.
    pub async fn load_into(
        &self,
        session: &mut RosterSession,
        source: &RosterSource,
        store: Option<&dyn KeyValueStore>,
    ) -> Result<String> {
        let result = self.load(source).await?;
        let message = result.status_message();

        if self.persist_on_load {
            if let Some(store) = store {
                if let Err(e) = persistence::save(store, &result.roster) {
                    warn!("Could not save roster snapshot: {}", e);
                }
            }
        }

        session.replace_roster(result.roster);
        info!("{}", message);
        Ok(message)
    }

    /// Restore the last saved snapshot. Returns `None` if nothing was saved.
    pub fn restore_into(
        &self,
        session: &mut RosterSession,
        store: &dyn KeyValueStore,
    ) -> Result<Option<String>> {
        let Some(state) = persistence::load(store)? else {
            return Ok(None);
        };
        let timestamp = state.timestamp.clone();
        let count = session.restore(state)?;
        let message = format!("Restored {} people saved at {}", count, timestamp);
        info!("{}", message);
        Ok(Some(message))
    }
}

impl Default for RosterLoaderService {
    fn default() -> Self {
        Self::new(true, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatError, RosterError};
    use crate::persistence::MemoryStore;
    use std::path::PathBuf;

    fn missing() -> RosterSource {
        RosterSource::File(PathBuf::from("/no/such/roster.csv"))
    }

    #[tokio::test]
    async fn test_unavailable_source_falls_back() {
        let service = RosterLoaderService::new(true, false);
        let result = service.load(&missing()).await.unwrap();
        assert!(result.used_fallback);
        assert_eq!(result.source, RosterSource::Sample);
        assert_eq!(result.roster.len(), 8);
        assert!(result.status_message().contains("sample data"));
    }

    #[tokio::test]
    async fn test_unavailable_source_without_fallback() {
        let service = RosterLoaderService::new(false, false);
        let err = service.load(&missing()).await.unwrap_err();
        let err = err.downcast_ref::<RosterError>().unwrap();
        assert!(err.is_source_unavailable());
    }

    #[tokio::test]
    async fn test_format_error_does_not_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "name,email,role\nAda,a@x.org,Dev\n").unwrap();

        let service = RosterLoaderService::default();
        let err = service.load(&RosterSource::File(path)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RosterError>(),
            Some(RosterError::Format(FormatError::MissingColumns { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_into_persists_and_restores() {
        let service = RosterLoaderService::new(true, true);
        let store = MemoryStore::new();
        let mut session = RosterSession::default();

        service
            .load_into(&mut session, &RosterSource::Sample, Some(&store))
            .await
            .unwrap();
        assert_eq!(session.roster().len(), 8);

        let mut restored = RosterSession::default();
        let message = service.restore_into(&mut restored, &store).unwrap();
        assert!(message.unwrap().starts_with("Restored 8 people"));
        assert_eq!(restored.roster(), session.roster());
    }

    /// Store that accepts nothing
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> crate::error::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> crate::error::Result<()> {
            Err(RosterError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )))
        }

        fn remove(&self, _key: &str) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_snapshot_write_failure_keeps_loaded_roster() {
        let service = RosterLoaderService::new(false, true);
        let mut session = RosterSession::default();

        let message = service
            .load_into(&mut session, &RosterSource::Sample, Some(&ReadOnlyStore))
            .await
            .unwrap();
        assert!(message.starts_with("Loaded 8 people"));
        assert_eq!(session.roster().len(), 8);
    }

    #[test]
    fn test_restore_with_empty_store() {
        let service = RosterLoaderService::default();
        let mut session = RosterSession::default();
        assert!(service
            .restore_into(&mut session, &MemoryStore::new())
            .unwrap()
            .is_none());
    }
}
