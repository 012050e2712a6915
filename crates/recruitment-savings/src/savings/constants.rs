use serde::Serialize;

/// Published source backing the revenue-per-position figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub label: &'static str,
    pub url: &'static str,
}

/// Industry figures every estimate is computed from.
///
/// Values are fixed for the lifetime of the process; `working_days_per_year` and
/// `service_fee_per_position` are never zero, which keeps the derived ratios defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectorConstants {
    /// Average revenue generated by one full-time position, in euros per year.
    pub annual_revenue_per_position: f64,
    pub working_days_per_year: u32,
    pub average_vacancy_days_unassisted: u32,
    pub average_vacancy_days_assisted: u32,
    /// Flat recruitment fee charged per position, in euros.
    pub service_fee_per_position: f64,
    /// Multiplier applied to net savings for lower turnover of euro-zone hires.
    pub reliability_bonus_factor: f64,
    pub revenue_citation: Citation,
}

/// French restaurant sector figures (Cerfrance 2024-2025).
pub const RESTAURANT_FRANCE: SectorConstants = SectorConstants {
    annual_revenue_per_position: 74_078.0,
    working_days_per_year: 220,
    average_vacancy_days_unassisted: 45,
    average_vacancy_days_assisted: 10,
    service_fee_per_position: 2_000.0,
    reliability_bonus_factor: 1.10,
    revenue_citation: Citation {
        label: "Cerfrance 2024-2025",
        url: "https://www.cerfrance.fr/actualites/les-chiffres-cles-de-la-restauration-en-2024-2025",
    },
};

impl SectorConstants {
    pub const fn restaurant_france() -> Self {
        RESTAURANT_FRANCE
    }

    pub fn daily_revenue_per_position(&self) -> f64 {
        self.annual_revenue_per_position / f64::from(self.working_days_per_year)
    }

    /// Reliability bonus expressed as a whole percentage (1.10 -> 10).
    pub fn reliability_bonus_pct(&self) -> i64 {
        ((self.reliability_bonus_factor - 1.0) * 100.0).round() as i64
    }
}
