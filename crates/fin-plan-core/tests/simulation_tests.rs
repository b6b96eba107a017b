use fin_plan_core::simulation::amortization;
use fin_plan_core::simulation::loan::{
    analyze_loan_simulation, build_schedule, LoanKind, LoanSimulationInput,
};
use fin_plan_core::FinPlanError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Mortgage scenario: 1,000,000 property, 20% down, 9.6% over 20 years
// ===========================================================================

fn mortgage_scenario() -> LoanSimulationInput {
    LoanSimulationInput {
        kind: LoanKind::Mortgage,
        name: "Casa centro".into(),
        property_value: dec!(1_000_000),
        down_payment_pct: dec!(20),
        annual_rate_pct: dec!(9.6),
        term_years: 20,
        additional_costs: Decimal::ZERO,
    }
}

#[test]
fn test_mortgage_derived_figures() {
    let out = analyze_loan_simulation(&mortgage_scenario(), None).unwrap().result;

    assert_eq!(out.down_payment, dec!(200_000));
    assert_eq!(out.loan_amount, dec!(800_000));
    assert_eq!(out.term_months, 240);
    assert_eq!(out.monthly_rate, dec!(0.008));
}

#[test]
fn test_mortgage_annuity_payment() {
    let out = analyze_loan_simulation(&mortgage_scenario(), None).unwrap().result;

    // 800,000 * 0.008 * 1.008^240 / (1.008^240 - 1) ≈ 7,509.37
    assert!((out.monthly_payment - dec!(7_509.37)).abs() < dec!(0.01));
    // payment * 240 months
    assert!((out.total_payment - dec!(1_802_248.35)).abs() < dec!(1));
    // total - principal
    assert!((out.total_interest - dec!(1_002_248.35)).abs() < dec!(1));
}

#[test]
fn test_mortgage_viability_thresholds() {
    let tight = analyze_loan_simulation(&mortgage_scenario(), Some(dec!(7_000))).unwrap();
    assert!(!tight.result.viable);

    let comfortable = analyze_loan_simulation(&mortgage_scenario(), Some(dec!(8_000))).unwrap();
    assert!(comfortable.result.viable);
}

#[test]
fn test_mortgage_full_schedule_amortizes_exactly() {
    let schedule = build_schedule(&mortgage_scenario(), None).unwrap().result;
    assert_eq!(schedule.rows.len(), 240);

    // Principal portions rebuild the loan amount
    let principal_sum: Decimal = schedule.rows.iter().map(|r| r.principal).sum();
    assert!((principal_sum - dec!(800_000)).abs() < dec!(0.01));

    // Final balance is clamped to exactly zero
    assert_eq!(schedule.rows.last().unwrap().balance, Decimal::ZERO);
    assert!(schedule.rows.iter().all(|r| r.balance >= Decimal::ZERO));
}

#[test]
fn test_mortgage_preview_matches_full_schedule() {
    let preview = analyze_loan_simulation(&mortgage_scenario(), None)
        .unwrap()
        .result
        .schedule_preview;
    let full = build_schedule(&mortgage_scenario(), None).unwrap().result.rows;

    assert_eq!(preview.len(), 12);
    assert_eq!(preview[11].balance, full[11].balance);
}

// ===========================================================================
// Zero-rate scenario: interest-free 120,000 over 60 months
// ===========================================================================

fn zero_rate_scenario() -> LoanSimulationInput {
    LoanSimulationInput {
        kind: LoanKind::Auto,
        name: "Agency financing".into(),
        property_value: dec!(120_000),
        down_payment_pct: Decimal::ZERO,
        annual_rate_pct: Decimal::ZERO,
        term_years: 5,
        additional_costs: Decimal::ZERO,
    }
}

#[test]
fn test_zero_rate_payment_is_exact() {
    let out = analyze_loan_simulation(&zero_rate_scenario(), None).unwrap().result;

    assert_eq!(out.monthly_payment, dec!(2_000));
    assert_eq!(out.total_payment, dec!(120_000));
    assert_eq!(out.total_interest, Decimal::ZERO);
}

#[test]
fn test_zero_rate_first_row() {
    let out = analyze_loan_simulation(&zero_rate_scenario(), None).unwrap().result;
    let first = &out.schedule_preview[0];

    assert_eq!(first.month, 1);
    assert_eq!(first.principal, dec!(2_000));
    assert_eq!(first.interest, Decimal::ZERO);
    assert_eq!(first.balance, dec!(118_000));
}

#[test]
fn test_zero_rate_viability_unaffected() {
    let out = analyze_loan_simulation(&zero_rate_scenario(), Some(dec!(2_000)))
        .unwrap()
        .result;
    assert!(out.viable);
}

// ===========================================================================
// Engine-level properties
// ===========================================================================

#[test]
fn test_viability_requires_a_capacity_figure() {
    // Even a trivial payment is non-viable without a linked capacity
    assert!(!amortization::is_viable(dec!(0.01), None));
}

#[test]
fn test_schedule_recomputes_identically() {
    let pmt = amortization::monthly_payment(dec!(300_000), dec!(0.0075), 180);
    let a = amortization::amortization_schedule(dec!(300_000), dec!(0.0075), pmt, 180);
    let b = amortization::amortization_schedule(dec!(300_000), dec!(0.0075), pmt, 180);

    assert_eq!(a.len(), b.len());
    for (ra, rb) in a.iter().zip(b.iter()) {
        assert_eq!(ra.balance, rb.balance);
        assert_eq!(ra.interest, rb.interest);
    }
}

#[test]
fn test_validation_errors_name_the_field() {
    let mut input = mortgage_scenario();
    input.annual_rate_pct = dec!(150);
    let err = analyze_loan_simulation(&input, None).unwrap_err();
    match err {
        FinPlanError::InvalidInput { field, .. } => assert_eq!(field, "annual_rate_pct"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}
