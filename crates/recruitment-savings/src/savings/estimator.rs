use super::constants::SectorConstants;
use super::domain::{CalculationInput, CalculationResult};

/// Computes the cost of leaving positions vacant versus delegating the hire.
///
/// Pure and synchronous: the result depends only on `input` and `constants`.
pub fn compute(input: &CalculationInput, constants: &SectorConstants) -> CalculationResult {
    let positions = f64::from(input.position_count);
    let daily_revenue = constants.daily_revenue_per_position();

    let total_vacancy_days_unassisted = u64::from(constants.average_vacancy_days_unassisted)
        + u64::from(input.days_already_vacant);
    let cost_unassisted = total_vacancy_days_unassisted as f64 * daily_revenue * positions;

    let service_cost = constants.service_fee_per_position * positions;
    let assisted_vacancy_cost =
        f64::from(constants.average_vacancy_days_assisted) * daily_revenue * positions;
    let cost_assisted = assisted_vacancy_cost + service_cost;

    let net_savings = (cost_unassisted - cost_assisted) * constants.reliability_bonus_factor;

    CalculationResult {
        position_count: input.position_count,
        total_vacancy_days_unassisted,
        vacancy_days_assisted: u64::from(constants.average_vacancy_days_assisted),
        daily_revenue_per_position: daily_revenue,
        cost_unassisted,
        cost_assisted,
        service_cost,
        net_savings,
        revenue_days_saved: net_savings / daily_revenue,
        return_on_investment: net_savings / service_cost,
    }
}

/// Holds the process-wide constants so handlers can share one instance.
#[derive(Debug, Clone, Copy)]
pub struct SavingsEstimator {
    constants: SectorConstants,
}

impl SavingsEstimator {
    pub const fn new(constants: SectorConstants) -> Self {
        Self { constants }
    }

    pub const fn restaurant_france() -> Self {
        Self::new(SectorConstants::restaurant_france())
    }

    pub fn constants(&self) -> &SectorConstants {
        &self.constants
    }

    pub fn compute(&self, input: &CalculationInput) -> CalculationResult {
        compute(input, &self.constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::savings::constants::RESTAURANT_FRANCE;

    fn approx(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    #[test]
    fn single_position_without_prior_vacancy() {
        let result = compute(&CalculationInput::default(), &RESTAURANT_FRANCE);

        assert_eq!(result.total_vacancy_days_unassisted, 45);
        assert_eq!(result.vacancy_days_assisted, 10);
        assert!(approx(result.daily_revenue_per_position, 336.718, 1e-3));
        assert!(approx(result.cost_unassisted, 15_152.318, 1e-2));
        assert!(approx(result.cost_assisted, 5_367.18, 1e-2));
        assert!(approx(result.service_cost, 2_000.0, f64::EPSILON));
        assert!(approx(result.net_savings, 10_763.65, 1e-2));
        assert!(approx(result.revenue_days_saved, 31.966, 1e-3));
        assert!(approx(result.return_on_investment, 5.3818, 1e-3));
    }

    #[test]
    fn three_positions_with_ten_days_vacant() {
        let input = CalculationInput {
            position_count: 3,
            days_already_vacant: 10,
        };
        let result = compute(&input, &RESTAURANT_FRANCE);

        assert_eq!(result.total_vacancy_days_unassisted, 55);
        assert!(approx(result.cost_unassisted, 55_558.5, 1e-1));
        assert!(approx(result.cost_assisted, 16_101.55, 1e-1));
        assert!(approx(result.service_cost, 6_000.0, f64::EPSILON));
    }

    #[test]
    fn largest_vacancy_keeps_the_full_day_count() {
        let input = CalculationInput {
            position_count: 1,
            days_already_vacant: u32::MAX,
        };
        let result = compute(&input, &RESTAURANT_FRANCE);

        assert_eq!(result.total_vacancy_days_unassisted, u64::from(u32::MAX) + 45);
        let expected = (u64::from(u32::MAX) + 45) as f64 * result.daily_revenue_per_position;
        assert!(approx(result.cost_unassisted, expected, 1.0));
    }

    #[test]
    fn estimator_delegates_to_constants() {
        let estimator = SavingsEstimator::restaurant_france();
        let input = CalculationInput {
            position_count: 2,
            days_already_vacant: 7,
        };
        assert_eq!(estimator.compute(&input), compute(&input, &RESTAURANT_FRANCE));
        assert_eq!(estimator.constants(), &RESTAURANT_FRANCE);
    }
}
