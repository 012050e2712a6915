use clap::{Args, ValueEnum};
use recruitment_savings::error::AppError;
use recruitment_savings::savings::{
    present, reference_panel, write_chart_csv, CalculationInput, ReferencePanel, RenderedView,
    SavingsEstimator,
};
use serde_json::json;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Number of positions to fill
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) positions: u32,
    /// Days the positions have already been vacant
    #[arg(long, default_value_t = 0)]
    pub(crate) days_vacant: u32,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    write_estimate(&args, std::io::stdout().lock())
}

fn write_estimate<W: Write>(args: &EstimateArgs, mut out: W) -> Result<(), AppError> {
    let estimator = SavingsEstimator::restaurant_france();
    let input = CalculationInput {
        position_count: args.positions,
        days_already_vacant: args.days_vacant,
    };
    let result = estimator.compute(&input);
    let view = present(&result);

    match args.format {
        OutputFormat::Text => out.write_all(render_estimate(&input, &view).as_bytes())?,
        OutputFormat::Json => {
            let payload = json!({ "input": input, "result": result, "view": view });
            serde_json::to_writer_pretty(&mut out, &payload)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_chart_csv(&view.chart, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

pub(crate) fn run_constants() -> Result<(), AppError> {
    let estimator = SavingsEstimator::restaurant_france();
    print!("{}", render_reference(&reference_panel(estimator.constants())));
    Ok(())
}

pub(crate) fn render_estimate(input: &CalculationInput, view: &RenderedView) -> String {
    let mut out = String::new();
    out.push_str("Recruitment savings estimate\n");
    out.push_str(&format!(
        "Positions to fill: {} | already vacant: {} days\n",
        input.position_count, input.days_already_vacant
    ));

    for group in &view.groups {
        out.push_str(&format!("\n{}\n", group.title));
        out.push_str(&format!("- {}: {}\n", group.vacancy.label, group.vacancy.value));
        out.push_str(&format!("- {}: {}\n", group.cost.label, group.cost.value));
    }

    out.push_str(&format!("\n{}\n", view.net_savings_headline));
    out.push_str(&format!("{}\n", view.revenue_days_callout));

    out.push_str("\nCost / benefit analysis\n");
    out.push_str(&format!("- Service cost: {}\n", view.cost_benefit.service_cost));
    out.push_str(&format!(
        "- Savings generated by the service: {}\n",
        view.cost_benefit.savings_generated
    ));
    out.push_str(&format!("- {}\n", view.cost_benefit.narrative));

    out.push_str(&format!("\n{} ({})\n", view.chart.title, view.chart.value_axis));
    let bar_width = 40usize;
    for bar in &view.chart.bars {
        let filled = usize::from(bar.relative_pct) * bar_width / 100;
        out.push_str(&format!(
            "{:<28} {:<40} {}\n",
            bar.label,
            "#".repeat(filled),
            bar.formatted_amount
        ));
    }
    out
}

pub(crate) fn render_reference(panel: &ReferencePanel) -> String {
    let mut out = format!("{}\n", panel.title);
    for entry in &panel.entries {
        out.push_str(&format!("- {}: {}", entry.label, entry.value));
        if let Some(note) = entry.note {
            out.push_str(&format!(" ({note})"));
        }
        out.push('\n');
        if let Some(citation) = entry.citation {
            out.push_str(&format!("  Source: {} <{}>\n", citation.label, citation.url));
        }
    }
    out
}
