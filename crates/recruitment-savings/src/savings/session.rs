use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::domain::CalculationInput;
use super::estimator::SavingsEstimator;
use super::report::{present, views::RenderedView};

/// Whether results wait for an explicit "run calculation" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Nothing is computed until the user runs the calculation once.
    Gated,
    /// Every input change recomputes.
    Always,
}

impl TriggerPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gated" | "button" => Some(Self::Gated),
            "always" | "live" => Some(Self::Always),
            _ => None,
        }
    }

    pub const fn initial_state(self) -> TriggerState {
        match self {
            Self::Gated => TriggerState::AwaitingTrigger,
            Self::Always => TriggerState::Calculated,
        }
    }
}

/// Per-session gate. There is no transition back to `AwaitingTrigger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    AwaitingTrigger,
    Calculated,
}

impl TriggerState {
    pub const fn fire(self) -> Self {
        Self::Calculated
    }

    pub const fn is_calculated(self) -> bool {
        matches!(self, Self::Calculated)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AwaitingTrigger => "Awaiting calculation",
            Self::Calculated => "Calculated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Session-scoped state for one form user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub state: TriggerState,
    pub opened_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    /// Inputs from the most recent interaction, replayed when the page is reloaded.
    pub last_input: CalculationInput,
}

/// Storage abstraction so the session service can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionStoreError>;
    fn update(&self, record: SessionRecord) -> Result<(), SessionStoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;
    /// Drops sessions last seen before `cutoff`, returning how many were removed.
    fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("session {0} has expired or never existed")]
    UnknownSession(String),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Result of evaluating one interaction against a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub session_id: SessionId,
    pub state: TriggerState,
    pub state_label: &'static str,
    pub input: CalculationInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<RenderedView>,
}

/// Applies the trigger gate around the estimator for each session.
pub struct SavingsSessionService<S> {
    store: Arc<S>,
    estimator: SavingsEstimator,
    policy: TriggerPolicy,
    idle_timeout: Duration,
}

impl<S> SavingsSessionService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(
        store: Arc<S>,
        estimator: SavingsEstimator,
        policy: TriggerPolicy,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            store,
            estimator,
            policy,
            idle_timeout,
        }
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    pub fn estimator(&self) -> &SavingsEstimator {
        &self.estimator
    }

    /// Opens a fresh session in the policy's initial state.
    pub fn open(&self, now: DateTime<Utc>) -> Result<SessionRecord, SessionServiceError> {
        let record = SessionRecord {
            id: SessionId::generate(),
            state: self.policy.initial_state(),
            opened_at: now,
            last_seen: now,
            last_input: CalculationInput::default(),
        };
        let stored = self.store.insert(record)?;
        info!(session = %stored.id.0, state = ?stored.state, "estimator session opened");
        Ok(stored)
    }

    /// Returns the live session for `id`, or opens a new one when it is missing or idle.
    pub fn resume_or_open(
        &self,
        id: Option<&SessionId>,
        now: DateTime<Utc>,
    ) -> Result<SessionRecord, SessionServiceError> {
        if let Some(id) = id {
            if let Some(record) = self.live_session(id, now)? {
                return Ok(record);
            }
            debug!(session = %id.0, "session missing or idle, opening a new one");
        }
        self.open(now)
    }

    /// Records the interaction, fires the trigger when requested, and renders when calculated.
    pub fn evaluate(
        &self,
        id: &SessionId,
        input: CalculationInput,
        trigger: bool,
        now: DateTime<Utc>,
    ) -> Result<SessionOutcome, SessionServiceError> {
        let mut record = self
            .live_session(id, now)?
            .ok_or_else(|| SessionServiceError::UnknownSession(id.0.clone()))?;

        if trigger && !record.state.is_calculated() {
            record.state = record.state.fire();
            info!(session = %record.id.0, "savings calculation triggered");
        }
        record.last_seen = now;
        record.last_input = input;
        self.store.update(record.clone())?;

        let view = if record.state.is_calculated() {
            let result = self.estimator.compute(&input);
            Some(present(&result))
        } else {
            None
        };

        Ok(SessionOutcome {
            session_id: record.id,
            state: record.state,
            state_label: record.state.label(),
            input,
            view,
        })
    }

    /// Drops sessions idle for longer than the configured timeout.
    pub fn prune_idle(&self, now: DateTime<Utc>) -> Result<usize, SessionServiceError> {
        let removed = self.store.remove_idle(now - self.idle_timeout)?;
        if removed > 0 {
            info!(removed, "pruned idle estimator sessions");
        }
        Ok(removed)
    }

    fn live_session(
        &self,
        id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionRecord>, SessionServiceError> {
        let record = self.store.fetch(id)?;
        Ok(record.filter(|record| now - record.last_seen <= self.idle_timeout))
    }
}
