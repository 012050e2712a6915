use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::savings::estimator::SavingsEstimator;
use crate::savings::session::{
    SavingsSessionService, SessionId, SessionRecord, SessionStore, SessionStoreError,
    TriggerPolicy,
};

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl MemorySessions {
    pub(super) fn get(&self, id: &SessionId) -> Option<SessionRecord> {
        self.records.lock().expect("lock").get(id).cloned()
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl SessionStore for MemorySessions {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionStoreError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
        let mut guard = self.records.lock().expect("lock");
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(SessionStoreError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut guard = self.records.lock().expect("lock");
        let before = guard.len();
        guard.retain(|_, record| record.last_seen >= cutoff);
        Ok(before - guard.len())
    }
}

pub(super) struct UnavailableSessions;

impl SessionStore for UnavailableSessions {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, SessionStoreError> {
        Err(SessionStoreError::Unavailable("offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("offline".to_string()))
    }

    fn remove_idle(&self, _cutoff: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        Err(SessionStoreError::Unavailable("offline".to_string()))
    }
}

pub(super) fn idle_timeout() -> Duration {
    Duration::minutes(30)
}

pub(super) fn service_with(
    store: MemorySessions,
    policy: TriggerPolicy,
) -> SavingsSessionService<MemorySessions> {
    SavingsSessionService::new(
        Arc::new(store),
        SavingsEstimator::restaurant_france(),
        policy,
        idle_timeout(),
    )
}

pub(super) fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}
