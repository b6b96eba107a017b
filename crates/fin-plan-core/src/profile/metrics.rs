use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinPlanError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinPlanResult;

/// Share of total income considered safe to commit to debt service.
pub const DEBT_CAPACITY_RATIO: Decimal = dec!(0.35);

const CREDIT_SCORE_MIN: u16 = 300;
const CREDIT_SCORE_MAX: u16 = 850;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A user's declared financial situation. Stored as entered; every metric
/// is recomputed from these fields on each access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub id: u64,
    pub monthly_income: Money,
    #[serde(default)]
    pub other_income: Money,
    pub fixed_expenses: Money,
    pub monthly_savings: Money,
    #[serde(default)]
    pub current_savings: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<u16>,
}

/// Derived profile metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMetricsOutput {
    pub total_income: Money,
    pub savings_capacity: Money,
    /// Maximum monthly payment considered affordable.
    pub debt_capacity: Money,
    pub savings_rate: Rate,
    /// Months of fixed expenses covered by current savings. None when the
    /// profile declares no fixed expenses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_fund_months: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive income, savings and debt-capacity metrics from a profile.
pub fn analyze_profile(
    profile: &FinancialProfile,
) -> FinPlanResult<ComputationOutput<ProfileMetricsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_profile(profile)?;

    let total_income = profile.monthly_income + profile.other_income;
    let savings_capacity = total_income - profile.fixed_expenses;
    let debt_capacity = total_income * DEBT_CAPACITY_RATIO;
    let savings_rate = profile.monthly_savings / total_income;

    if savings_capacity < Decimal::ZERO {
        warnings.push("Fixed expenses exceed total income".into());
    }

    let emergency_fund_months = if profile.fixed_expenses.is_zero() {
        None
    } else {
        Some(profile.current_savings / profile.fixed_expenses)
    };

    let output = ProfileMetricsOutput {
        total_income,
        savings_capacity,
        debt_capacity,
        savings_rate,
        emergency_fund_months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Profile-derived affordability metrics",
        &serde_json::json!({
            "profile_id": profile.id,
            "debt_capacity_ratio": DEBT_CAPACITY_RATIO.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_profile(profile: &FinancialProfile) -> FinPlanResult<()> {
    if profile.monthly_income <= Decimal::ZERO {
        return Err(FinPlanError::InvalidInput {
            field: "monthly_income".into(),
            reason: "Monthly income must be positive".into(),
        });
    }
    for (field, value) in [
        ("other_income", profile.other_income),
        ("fixed_expenses", profile.fixed_expenses),
        ("monthly_savings", profile.monthly_savings),
        ("current_savings", profile.current_savings),
    ] {
        if value < Decimal::ZERO {
            return Err(FinPlanError::InvalidInput {
                field: field.into(),
                reason: "Amount cannot be negative".into(),
            });
        }
    }
    if let Some(score) = profile.credit_score {
        if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&score) {
            return Err(FinPlanError::InvalidInput {
                field: "credit_score".into(),
                reason: format!(
                    "Credit score must be between {CREDIT_SCORE_MIN} and {CREDIT_SCORE_MAX}"
                ),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
