use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use recruitment_savings::savings::{
    SavingsEstimator, SessionId, SessionRecord, SessionStore, SessionStoreError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) estimator: SavingsEstimator,
}

/// Process-local session storage; sessions do not survive a restart.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, SessionRecord>>, SessionStoreError>
    {
        self.records
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionStoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(SessionStoreError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|_, record| record.last_seen >= cutoff);
        Ok(before - guard.len())
    }
}

/// Reads a number input the way the form widget would: blanks and junk fall back to `fallback`.
pub(crate) fn parse_number_field(raw: Option<&str>, fallback: i64) -> i64 {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(fallback)
}
