//! Vacancy cost estimation, presentation, and the per-session calculation gate.

pub mod constants;
pub mod domain;
pub mod estimator;
pub mod report;
pub mod router;
pub mod session;

#[cfg(test)]
mod tests;

pub use constants::{Citation, SectorConstants, RESTAURANT_FRANCE};
pub use domain::{CalculationInput, CalculationResult, InputError, Scenario};
pub use estimator::{compute, SavingsEstimator};
pub use report::views::{ReferencePanel, RenderedView};
pub use report::{present, reference_panel, write_chart_csv};
pub use router::session_router;
pub use session::{
    SavingsSessionService, SessionId, SessionOutcome, SessionRecord, SessionServiceError,
    SessionStore, SessionStoreError, TriggerPolicy, TriggerState,
};
