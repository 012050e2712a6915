use serde::{Deserialize, Serialize};

pub const MIN_POSITION_COUNT: u32 = 1;
pub const MIN_DAYS_ALREADY_VACANT: u32 = 0;

/// The two hiring scenarios compared by every estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Unassisted,
    Assisted,
}

impl Scenario {
    pub const fn ordered() -> [Self; 2] {
        [Self::Unassisted, Self::Assisted]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unassisted => "Without specialised agency",
            Self::Assisted => "With delegated recruitment",
        }
    }
}

/// Values collected from the form for one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub position_count: u32,
    pub days_already_vacant: u32,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            position_count: MIN_POSITION_COUNT,
            days_already_vacant: MIN_DAYS_ALREADY_VACANT,
        }
    }
}

impl CalculationInput {
    /// Strict constructor used by the JSON API.
    pub fn new(position_count: i64, days_already_vacant: i64) -> Result<Self, InputError> {
        if position_count < i64::from(MIN_POSITION_COUNT) {
            return Err(InputError::PositionCountTooLow {
                value: position_count,
            });
        }
        if days_already_vacant < i64::from(MIN_DAYS_ALREADY_VACANT) {
            return Err(InputError::NegativeDaysVacant {
                value: days_already_vacant,
            });
        }

        let position_count = u32::try_from(position_count).map_err(|_| InputError::TooLarge {
            field: "position_count",
            value: position_count,
        })?;
        let days_already_vacant =
            u32::try_from(days_already_vacant).map_err(|_| InputError::TooLarge {
                field: "days_already_vacant",
                value: days_already_vacant,
            })?;

        Ok(Self {
            position_count,
            days_already_vacant,
        })
    }

    /// Clamps raw widget values into range the way a `min_value` number input does.
    pub fn coerce(position_count: i64, days_already_vacant: i64) -> Self {
        Self {
            position_count: clamp_to_u32(position_count, MIN_POSITION_COUNT),
            days_already_vacant: clamp_to_u32(days_already_vacant, MIN_DAYS_ALREADY_VACANT),
        }
    }
}

fn clamp_to_u32(value: i64, min: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(u32::MAX)) as u32
}

/// Rejected API input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("position_count must be at least 1 (got {value})")]
    PositionCountTooLow { value: i64 },
    #[error("days_already_vacant cannot be negative (got {value})")]
    NegativeDaysVacant { value: i64 },
    #[error("{field} is too large (got {value})")]
    TooLarge { field: &'static str, value: i64 },
}

/// Outcome of one estimate. All amounts are unrounded euros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub position_count: u32,
    pub total_vacancy_days_unassisted: u64,
    pub vacancy_days_assisted: u64,
    pub daily_revenue_per_position: f64,
    pub cost_unassisted: f64,
    pub cost_assisted: f64,
    pub service_cost: f64,
    pub net_savings: f64,
    pub revenue_days_saved: f64,
    pub return_on_investment: f64,
}

impl CalculationResult {
    pub fn vacancy_days(&self, scenario: Scenario) -> u64 {
        match scenario {
            Scenario::Unassisted => self.total_vacancy_days_unassisted,
            Scenario::Assisted => self.vacancy_days_assisted,
        }
    }

    pub fn total_cost(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Unassisted => self.cost_unassisted,
            Scenario::Assisted => self.cost_assisted,
        }
    }
}
