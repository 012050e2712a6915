pub mod format;
pub mod views;

use super::constants::SectorConstants;
use super::domain::{CalculationResult, Scenario};
use format::{format_currency, format_days, format_grouped, format_ratio};
use serde::Serialize;
use std::io::Write;
use views::{
    BarChartEntry, BarChartView, CostBenefitView, MetricView, ReferenceEntry, ReferencePanel,
    RenderedView, ScenarioGroupView,
};

/// Builds the display payload for a computed estimate. Rounding happens here only.
pub fn present(result: &CalculationResult) -> RenderedView {
    let groups = Scenario::ordered()
        .into_iter()
        .map(|scenario| ScenarioGroupView {
            scenario,
            title: scenario.label(),
            vacancy: MetricView {
                label: "Vacancy duration",
                value: format_days(result.vacancy_days(scenario)),
            },
            cost: MetricView {
                label: match scenario {
                    Scenario::Unassisted => "Estimated loss",
                    Scenario::Assisted => "Total cost (vacancy + service)",
                },
                value: format_currency(result.total_cost(scenario)),
            },
        })
        .collect();

    let service_cost = format_currency(result.service_cost);
    let savings_generated = format_currency(result.net_savings);
    let return_per_euro = format_ratio(result.return_on_investment);
    let narrative = format!(
        "Each euro invested in the service generates about {return_per_euro} € of net savings."
    );

    RenderedView {
        groups,
        net_savings_headline: format!("Net savings achieved: {savings_generated}"),
        revenue_days_callout: format!(
            "Equivalent to {} days of revenue saved",
            format_grouped(result.revenue_days_saved)
        ),
        cost_benefit: CostBenefitView {
            service_cost,
            savings_generated,
            return_per_euro,
            narrative,
        },
        chart: bar_chart(result),
        result: *result,
    }
}

fn bar_chart(result: &CalculationResult) -> BarChartView {
    let tallest = Scenario::ordered()
        .into_iter()
        .map(|scenario| result.total_cost(scenario))
        .fold(0.0_f64, f64::max);

    let bars = Scenario::ordered()
        .into_iter()
        .map(|scenario| {
            let amount = result.total_cost(scenario);
            let relative_pct = if tallest > 0.0 {
                ((amount.max(0.0) / tallest) * 100.0).round().clamp(0.0, 100.0) as u8
            } else {
                0
            };
            BarChartEntry {
                scenario,
                label: scenario.label(),
                amount,
                formatted_amount: format_currency(amount),
                relative_pct,
            }
        })
        .collect();

    BarChartView {
        title: "Cost comparison",
        value_axis: "Amount (€)",
        bars,
    }
}

/// Lists the sector figures and their source.
pub fn reference_panel(constants: &SectorConstants) -> ReferencePanel {
    let entry = |label, value: String, note| ReferenceEntry {
        label,
        value,
        note,
        citation: None,
    };

    ReferencePanel {
        title: "Parameters and sources",
        entries: vec![
            ReferenceEntry {
                label: "Average annual revenue per employee (FTE)",
                value: format_currency(constants.annual_revenue_per_position),
                note: None,
                citation: Some(constants.revenue_citation),
            },
            entry(
                "Working days per year per FTE",
                constants.working_days_per_year.to_string(),
                Some("legal basis of 35 hours per week"),
            ),
            entry(
                "Average daily revenue per FTE",
                format_currency(constants.daily_revenue_per_position()),
                None,
            ),
            entry(
                "Average vacancy without specialised agency",
                format_days(u64::from(constants.average_vacancy_days_unassisted)),
                None,
            ),
            entry(
                "Vacancy with delegated recruitment",
                format_days(u64::from(constants.average_vacancy_days_assisted)),
                None,
            ),
            entry(
                "Fixed service fee",
                format_currency(constants.service_fee_per_position),
                Some("per position"),
            ),
            entry(
                "Euro-zone reliability bonus",
                format!("+{}%", constants.reliability_bonus_pct()),
                None,
            ),
        ],
    }
}

#[derive(Debug, Serialize)]
struct ChartRow<'a> {
    scenario: Scenario,
    label: &'a str,
    amount_eur: String,
}

/// Writes the bar-chart dataset as CSV (`scenario,label,amount_eur`).
pub fn write_chart_csv<W: Write>(chart: &BarChartView, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for bar in &chart.bars {
        csv_writer.serialize(ChartRow {
            scenario: bar.scenario,
            label: bar.label,
            amount_eur: format!("{:.2}", bar.amount),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
