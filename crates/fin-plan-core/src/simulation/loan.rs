use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinPlanError;
use crate::simulation::amortization::{self, ScheduleRow};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::FinPlanResult;

/// Months of the schedule attached to a simulation analysis as a preview.
const SCHEDULE_PREVIEW_MONTHS: usize = 12;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Loan product being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanKind {
    Mortgage,
    Auto,
}

/// The fixed terms of a loan simulation. Immutable once created; every
/// derived figure is recomputed from these fields on each access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSimulationInput {
    pub kind: LoanKind,
    pub name: String,
    pub property_value: Money,
    pub down_payment_pct: Percent,
    pub annual_rate_pct: Percent,
    pub term_years: u32,
    /// Insurance, notary and other closing costs.
    #[serde(default)]
    pub additional_costs: Money,
}

impl LoanSimulationInput {
    pub fn down_payment(&self) -> Money {
        self.property_value * self.down_payment_pct / dec!(100)
    }

    pub fn loan_amount(&self) -> Money {
        self.property_value - self.down_payment()
    }

    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_pct / dec!(100) / dec!(12)
    }
}

/// A stored simulation: terms plus ownership and creation date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSimulationRecord {
    pub id: u64,
    pub profile_id: u64,
    pub simulated: NaiveDate,
    #[serde(flatten)]
    pub terms: LoanSimulationInput,
}

/// All derived figures for a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSimulationOutput {
    pub down_payment: Money,
    pub loan_amount: Money,
    pub term_months: u32,
    pub monthly_rate: Rate,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub viable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_capacity: Option<Money>,
    pub schedule_preview: Vec<ScheduleRow>,
}

/// A full (or truncated) amortization table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub monthly_payment: Money,
    pub term_months: u32,
    pub months_shown: u32,
    pub rows: Vec<ScheduleRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a loan simulation: derived amounts, payment figures, viability
/// against an optional debt capacity, and a schedule preview.
pub fn analyze_loan_simulation(
    input: &LoanSimulationInput,
    debt_capacity: Option<Money>,
) -> FinPlanResult<ComputationOutput<LoanSimulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_simulation(input)?;

    let loan_amount = input.loan_amount();
    let term_months = input.term_months();
    let monthly_rate = input.monthly_rate();

    if loan_amount.is_zero() {
        warnings.push("Down payment covers the full property value; nothing is financed".into());
    }
    if debt_capacity.is_none() {
        warnings.push("No debt capacity supplied; viability defaults to false".into());
    }

    let monthly_payment = amortization::monthly_payment(loan_amount, monthly_rate, term_months);
    let total_payment =
        amortization::total_payment(monthly_payment, term_months, input.additional_costs);
    let total_interest =
        amortization::total_interest(total_payment, loan_amount, input.additional_costs);
    let viable = amortization::is_viable(monthly_payment, debt_capacity);

    let mut schedule_preview =
        amortization::amortization_schedule(loan_amount, monthly_rate, monthly_payment, term_months);
    schedule_preview.truncate(SCHEDULE_PREVIEW_MONTHS);

    let output = LoanSimulationOutput {
        down_payment: input.down_payment(),
        loan_amount,
        term_months,
        monthly_rate,
        monthly_payment,
        total_payment,
        total_interest,
        viable,
        debt_capacity,
        schedule_preview,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity loan simulation",
        &serde_json::json!({
            "name": input.name,
            "kind": input.kind,
            "property_value": input.property_value.to_string(),
            "down_payment_pct": input.down_payment_pct.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "term_years": input.term_years,
            "additional_costs": input.additional_costs.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Build the amortization table for a simulation, optionally truncated to
/// the first `months` rows. Recomputed from the stored terms on every call.
pub fn build_schedule(
    input: &LoanSimulationInput,
    months: Option<u32>,
) -> FinPlanResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate_simulation(input)?;

    let loan_amount = input.loan_amount();
    let term_months = input.term_months();
    let monthly_rate = input.monthly_rate();
    let monthly_payment = amortization::monthly_payment(loan_amount, monthly_rate, term_months);

    let mut rows =
        amortization::amortization_schedule(loan_amount, monthly_rate, monthly_payment, term_months);
    let months_shown = months.unwrap_or(term_months).min(term_months);
    rows.truncate(months_shown as usize);

    let output = ScheduleOutput {
        monthly_payment,
        term_months,
        months_shown,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization schedule",
        &serde_json::json!({
            "name": input.name,
            "term_months": term_months,
            "monthly_rate": monthly_rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_simulation(input: &LoanSimulationInput) -> FinPlanResult<()> {
    if input.property_value <= Decimal::ZERO {
        return Err(FinPlanError::InvalidInput {
            field: "property_value".into(),
            reason: "Property value must be positive".into(),
        });
    }
    if input.down_payment_pct < Decimal::ZERO || input.down_payment_pct > dec!(100) {
        return Err(FinPlanError::InvalidInput {
            field: "down_payment_pct".into(),
            reason: "Down payment must be between 0 and 100 percent".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO || input.annual_rate_pct > dec!(100) {
        return Err(FinPlanError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual interest rate must be between 0 and 100 percent".into(),
        });
    }
    if input.term_years == 0 {
        return Err(FinPlanError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    if input.additional_costs < Decimal::ZERO {
        return Err(FinPlanError::InvalidInput {
            field: "additional_costs".into(),
            reason: "Additional costs cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> LoanSimulationInput {
        LoanSimulationInput {
            kind: LoanKind::Mortgage,
            name: "First home".into(),
            property_value: dec!(1_000_000),
            down_payment_pct: dec!(20),
            annual_rate_pct: dec!(9.6),
            term_years: 20,
            additional_costs: Decimal::ZERO,
        }
    }

    #[test]
    fn test_derived_amounts() {
        let input = base_input();
        assert_eq!(input.down_payment(), dec!(200_000));
        assert_eq!(input.loan_amount(), dec!(800_000));
        assert_eq!(input.term_months(), 240);
        assert_eq!(input.monthly_rate(), dec!(0.008));
    }

    #[test]
    fn test_analysis_payment_figures() {
        let result = analyze_loan_simulation(&base_input(), None).unwrap();
        let out = &result.result;

        // Annuity payment at 0.8%/month over 240 months ≈ 7,509.37
        assert!((out.monthly_payment - dec!(7_509.37)).abs() < dec!(0.01));
        // total = payment * 240
        assert!((out.total_payment - dec!(1_802_248.35)).abs() < dec!(1));
        // interest = total - loan
        assert!((out.total_interest - dec!(1_002_248.35)).abs() < dec!(1));
    }

    #[test]
    fn test_schedule_preview_is_twelve_months() {
        let result = analyze_loan_simulation(&base_input(), None).unwrap();
        assert_eq!(result.result.schedule_preview.len(), 12);
        assert_eq!(result.result.schedule_preview[0].month, 1);
    }

    #[test]
    fn test_viability_without_capacity_is_false_with_warning() {
        let result = analyze_loan_simulation(&base_input(), None).unwrap();
        assert!(!result.result.viable);
        assert!(result.warnings.iter().any(|w| w.contains("debt capacity")));
    }

    #[test]
    fn test_viability_against_capacity() {
        let below = analyze_loan_simulation(&base_input(), Some(dec!(7_000))).unwrap();
        assert!(!below.result.viable);

        let above = analyze_loan_simulation(&base_input(), Some(dec!(8_000))).unwrap();
        assert!(above.result.viable);
    }

    #[test]
    fn test_full_down_payment_warns() {
        let mut input = base_input();
        input.down_payment_pct = dec!(100);
        let result = analyze_loan_simulation(&input, None).unwrap();
        assert_eq!(result.result.loan_amount, Decimal::ZERO);
        assert_eq!(result.result.monthly_payment, Decimal::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("nothing is financed")));
    }

    #[test]
    fn test_additional_costs_flow_through() {
        let mut input = base_input();
        input.annual_rate_pct = Decimal::ZERO;
        input.additional_costs = dec!(15_000);
        let out = analyze_loan_simulation(&input, None).unwrap().result;

        // 800k straight-line over 240 months
        assert_eq!(out.monthly_payment, dec!(800_000) / dec!(240));
        assert_eq!(out.total_payment, dec!(800_000) + dec!(15_000));
        // Ancillary costs are not interest
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_truncation() {
        let result = build_schedule(&base_input(), Some(24)).unwrap();
        assert_eq!(result.result.rows.len(), 24);
        assert_eq!(result.result.months_shown, 24);
        assert_eq!(result.result.term_months, 240);
    }

    #[test]
    fn test_schedule_truncation_caps_at_term() {
        let result = build_schedule(&base_input(), Some(999)).unwrap();
        assert_eq!(result.result.rows.len(), 240);
        assert_eq!(result.result.months_shown, 240);
    }

    #[test]
    fn test_negative_property_value_rejected() {
        let mut input = base_input();
        input.property_value = dec!(-1);
        let err = analyze_loan_simulation(&input, None).unwrap_err();
        match err {
            FinPlanError::InvalidInput { field, .. } => assert_eq!(field, "property_value"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_down_payment_over_100_rejected() {
        let mut input = base_input();
        input.down_payment_pct = dec!(101);
        assert!(analyze_loan_simulation(&input, None).is_err());
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut input = base_input();
        input.term_years = 0;
        assert!(analyze_loan_simulation(&input, None).is_err());
    }

    #[test]
    fn test_record_round_trips_flattened_terms() {
        let record = LoanSimulationRecord {
            id: 7,
            profile_id: 1,
            simulated: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            terms: base_input(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: LoanSimulationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.terms.property_value, dec!(1_000_000));
        assert_eq!(back.profile_id, 1);
    }
}
