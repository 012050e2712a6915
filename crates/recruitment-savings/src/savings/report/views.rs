use super::super::constants::Citation;
use super::super::domain::{CalculationResult, Scenario};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MetricView {
    pub label: &'static str,
    pub value: String,
}

/// One side of the side-by-side comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioGroupView {
    pub scenario: Scenario,
    pub title: &'static str,
    pub vacancy: MetricView,
    pub cost: MetricView,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostBenefitView {
    pub service_cost: String,
    pub savings_generated: String,
    pub return_per_euro: String,
    pub narrative: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarChartEntry {
    pub scenario: Scenario,
    pub label: &'static str,
    pub amount: f64,
    pub formatted_amount: String,
    /// Bar length relative to the tallest bar, 0-100.
    pub relative_pct: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarChartView {
    pub title: &'static str,
    pub value_axis: &'static str,
    pub bars: Vec<BarChartEntry>,
}

/// Display payload for a calculated estimate.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedView {
    pub groups: Vec<ScenarioGroupView>,
    pub net_savings_headline: String,
    pub revenue_days_callout: String,
    pub cost_benefit: CostBenefitView,
    pub chart: BarChartView,
    #[serde(skip)]
    pub result: CalculationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceEntry {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<Citation>,
}

/// Static panel listing the figures behind every estimate.
#[derive(Debug, Clone, Serialize)]
pub struct ReferencePanel {
    pub title: &'static str,
    pub entries: Vec<ReferenceEntry>,
}
