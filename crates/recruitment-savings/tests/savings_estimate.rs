use recruitment_savings::savings::{
    compute, present, reference_panel, write_chart_csv, CalculationInput, SavingsEstimator,
    Scenario, RESTAURANT_FRANCE,
};

fn within(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

#[test]
fn minimum_input_produces_the_reference_estimate() {
    let input = CalculationInput::new(1, 0).expect("minimum input is valid");
    let result = compute(&input, &RESTAURANT_FRANCE);

    assert_eq!(result.total_vacancy_days_unassisted, 45);
    assert!(within(result.cost_unassisted, 15_152.0, 1.0));
    assert!(within(result.cost_assisted, 5_367.0, 1.0));
    assert!(within(result.net_savings, 10_764.0, 1.0));

    let view = present(&result);
    assert_eq!(view.groups[0].title, Scenario::Unassisted.label());
    assert_eq!(view.groups[0].cost.value, "15,152 €");
    assert_eq!(view.groups[1].cost.value, "5,367 €");
    assert_eq!(view.net_savings_headline, "Net savings achieved: 10,764 €");
    assert_eq!(view.cost_benefit.return_per_euro, "5.4");
}

#[test]
fn several_positions_with_prior_vacancy() {
    let estimator = SavingsEstimator::restaurant_france();
    let input = CalculationInput::new(3, 10).expect("valid input");
    let result = estimator.compute(&input);

    assert_eq!(result.total_vacancy_days_unassisted, 55);
    assert!(within(result.service_cost, 6_000.0, f64::EPSILON));

    let view = present(&result);
    assert_eq!(view.groups[0].vacancy.value, "55 days");
    assert_eq!(view.groups[0].cost.value, "55,558 €");
    assert_eq!(view.cost_benefit.service_cost, "6,000 €");
}

#[test]
fn widget_coercion_never_produces_invalid_input() {
    let input = CalculationInput::coerce(0, -3);
    let result = compute(&input, &RESTAURANT_FRANCE);

    assert_eq!(input.position_count, 1);
    assert_eq!(input.days_already_vacant, 0);
    assert!(result.return_on_investment.is_finite());
}

#[test]
fn chart_export_and_reference_panel_agree_with_constants() {
    let view = present(&compute(&CalculationInput::default(), &RESTAURANT_FRANCE));
    let mut buffer = Vec::new();
    write_chart_csv(&view.chart, &mut buffer).expect("csv export");
    let exported = String::from_utf8(buffer).expect("utf8 csv");
    assert_eq!(exported.lines().count(), 3);

    let panel = reference_panel(&RESTAURANT_FRANCE);
    assert!(panel
        .entries
        .iter()
        .any(|entry| entry.value == "2,000 €" && entry.note == Some("per position")));
    assert!(panel
        .entries
        .iter()
        .filter_map(|entry| entry.citation)
        .any(|citation| citation.url.contains("cerfrance.fr")));
}
