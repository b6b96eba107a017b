use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::debts::book::{analyze_debt_book, DebtBookInput, DebtBookOutput, DebtRecord};
use crate::goals::progress::{analyze_goals, GoalAnalysisInput, GoalBookOutput, SavingsGoal};
use crate::profile::metrics::{analyze_profile, FinancialProfile, ProfileMetricsOutput};
use crate::recommendations::advisor::{generate_recommendations, Recommendation};
use crate::simulation::loan::{analyze_loan_simulation, LoanKind, LoanSimulationRecord};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinPlanResult;

/// How many simulations the dashboard shows, newest first.
const RECENT_SIMULATIONS: usize = 5;

/// How many recommendations the dashboard surfaces.
const TOP_RECOMMENDATIONS: usize = 3;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Everything the persistence layer hands over for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInput {
    pub profile: FinancialProfile,
    #[serde(default)]
    pub debts: Vec<DebtRecord>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub simulations: Vec<LoanSimulationRecord>,
}

/// Compact view of one evaluated simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub id: u64,
    pub name: String,
    pub kind: LoanKind,
    pub simulated: NaiveDate,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub viable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOutput {
    pub profile: ProfileMetricsOutput,
    pub debt_book: DebtBookOutput,
    pub goal_book: GoalBookOutput,
    pub recent_simulations: Vec<SimulationSummary>,
    pub recommendations: Vec<Recommendation>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assemble the per-user dashboard. Records not owned by the profile are
/// dropped with a warning; ownership never reaches the calculators.
pub fn assemble_dashboard(
    input: &DashboardInput,
) -> FinPlanResult<ComputationOutput<DashboardOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let profile_id = input.profile.id;

    let debts: Vec<DebtRecord> = input
        .debts
        .iter()
        .filter(|d| {
            let owned = d.profile_id == profile_id;
            if !owned {
                warnings.push(format!(
                    "debt {} '{}' does not belong to profile {profile_id}; dropped",
                    d.id, d.name
                ));
            }
            owned
        })
        .cloned()
        .collect();

    let goals: Vec<SavingsGoal> = input
        .goals
        .iter()
        .filter(|g| {
            let owned = g.profile_id == profile_id;
            if !owned {
                warnings.push(format!(
                    "goal {} '{}' does not belong to profile {profile_id}; dropped",
                    g.id, g.name
                ));
            }
            owned
        })
        .cloned()
        .collect();

    let mut simulations: Vec<LoanSimulationRecord> = input
        .simulations
        .iter()
        .filter(|s| {
            let owned = s.profile_id == profile_id;
            if !owned {
                warnings.push(format!(
                    "simulation {} '{}' does not belong to profile {profile_id}; dropped",
                    s.id, s.terms.name
                ));
            }
            owned
        })
        .cloned()
        .collect();

    let profile_out = analyze_profile(&input.profile)?;
    warnings.extend(profile_out.warnings);
    let metrics = profile_out.result;

    let debt_out = analyze_debt_book(&DebtBookInput {
        debts,
        monthly_income: Some(metrics.total_income),
    })?;
    warnings.extend(debt_out.warnings);
    let debt_book = debt_out.result;

    let goal_out = analyze_goals(&GoalAnalysisInput {
        goals,
        savings_capacity: metrics.savings_capacity,
        monthly_savings: input.profile.monthly_savings,
    })?;
    warnings.extend(goal_out.warnings);
    let goal_book = goal_out.result;

    simulations.sort_by(|a, b| b.simulated.cmp(&a.simulated));
    simulations.truncate(RECENT_SIMULATIONS);

    let mut recent_simulations = Vec::with_capacity(simulations.len());
    for record in &simulations {
        let sim = analyze_loan_simulation(&record.terms, Some(metrics.debt_capacity))?;
        warnings.extend(sim.warnings);
        recent_simulations.push(SimulationSummary {
            id: record.id,
            name: record.terms.name.clone(),
            kind: record.terms.kind,
            simulated: record.simulated,
            monthly_payment: sim.result.monthly_payment,
            total_payment: sim.result.total_payment,
            viable: sim.result.viable,
        });
    }

    let mut recommendations =
        generate_recommendations(&input.profile, &metrics, Some(&debt_book), Some(&goal_book));
    recommendations.truncate(TOP_RECOMMENDATIONS);

    let output = DashboardOutput {
        profile: metrics,
        debt_book,
        goal_book,
        recent_simulations,
        recommendations,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Per-user financial dashboard",
        &serde_json::json!({
            "profile_id": profile_id,
            "recent_simulations": RECENT_SIMULATIONS,
            "top_recommendations": TOP_RECOMMENDATIONS,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
