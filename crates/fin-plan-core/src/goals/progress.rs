use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinPlanError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinPlanResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    Home,
    Auto,
    Other,
}

/// A savings target over a fixed horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: u64,
    pub profile_id: u64,
    pub kind: GoalKind,
    pub name: String,
    pub target_amount: Money,
    pub term_months: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created: NaiveDate,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAnalysisInput {
    pub goals: Vec<SavingsGoal>,
    /// Income left after fixed expenses.
    pub savings_capacity: Money,
    /// What the profile actually puts aside each month.
    pub monthly_savings: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRow {
    pub id: u64,
    pub name: String,
    pub kind: GoalKind,
    pub target_amount: Money,
    pub term_months: u32,
    pub required_monthly_saving: Money,
    /// Whether the required saving fits within savings capacity.
    pub feasible: bool,
    /// Months to reach the target at the actual saving rate. None when
    /// nothing is being saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_at_current_rate: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalBookOutput {
    pub active_goals: usize,
    pub total_required_monthly_saving: Money,
    pub all_feasible: bool,
    /// Whether the combined requirement fits within savings capacity.
    pub within_capacity: bool,
    pub goals: Vec<GoalRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate savings goals against the profile's saving capacity and actual
/// saving rate. Inactive goals are excluded from rows and aggregates.
pub fn analyze_goals(
    input: &GoalAnalysisInput,
) -> FinPlanResult<ComputationOutput<GoalBookOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_goals(input)?;

    if input.monthly_savings.is_zero() && input.goals.iter().any(|g| g.active) {
        warnings.push("No monthly saving declared; progress projections omitted".into());
    }

    let rows: Vec<GoalRow> = input
        .goals
        .iter()
        .filter(|g| g.active)
        .map(|goal| {
            let required = goal.target_amount / Decimal::from(goal.term_months);
            let months_at_current_rate = if input.monthly_savings.is_zero() {
                None
            } else {
                (goal.target_amount / input.monthly_savings)
                    .ceil()
                    .to_u32()
            };
            GoalRow {
                id: goal.id,
                name: goal.name.clone(),
                kind: goal.kind,
                target_amount: goal.target_amount,
                term_months: goal.term_months,
                required_monthly_saving: required,
                feasible: required <= input.savings_capacity,
                months_at_current_rate,
            }
        })
        .collect();

    let total_required: Money = rows.iter().map(|r| r.required_monthly_saving).sum();

    let output = GoalBookOutput {
        active_goals: rows.len(),
        total_required_monthly_saving: total_required,
        all_feasible: rows.iter().all(|r| r.feasible),
        within_capacity: total_required <= input.savings_capacity,
        goals: rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Savings goal feasibility",
        &serde_json::json!({
            "savings_capacity": input.savings_capacity.to_string(),
            "monthly_savings": input.monthly_savings.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_goals(input: &GoalAnalysisInput) -> FinPlanResult<()> {
    for goal in &input.goals {
        if goal.target_amount <= Decimal::ZERO {
            return Err(FinPlanError::InvalidInput {
                field: "target_amount".into(),
                reason: format!("'{}': target must be positive", goal.name),
            });
        }
        if goal.term_months == 0 {
            return Err(FinPlanError::InvalidInput {
                field: "term_months".into(),
                reason: format!("'{}': term must be at least 1 month", goal.name),
            });
        }
    }
    if input.monthly_savings < Decimal::ZERO {
        return Err(FinPlanError::InvalidInput {
            field: "monthly_savings".into(),
            reason: "Monthly savings cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
