use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use fin_plan_core::debts::book::{analyze_debt_book, DebtBookInput, DebtRecord};
use fin_plan_core::goals::progress::{analyze_goals, GoalAnalysisInput, SavingsGoal};
use fin_plan_core::profile::metrics::{analyze_profile, FinancialProfile};
use fin_plan_core::recommendations::advisor::generate_recommendations;

use crate::input;

#[derive(Args)]
pub struct RecommendArgs {
    /// Path to JSON input file with a profile and optional debts/goals
    #[arg(long)]
    pub input: Option<String>,
}

/// File shape: the profile plus whatever satellite records are on hand.
#[derive(Deserialize)]
struct RecommendInput {
    profile: FinancialProfile,
    #[serde(default)]
    debts: Vec<DebtRecord>,
    #[serde(default)]
    goals: Vec<SavingsGoal>,
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rec_input: RecommendInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for recommendations".into());
    };

    let metrics = analyze_profile(&rec_input.profile)?.result;

    let debt_book = if rec_input.debts.is_empty() {
        None
    } else {
        Some(
            analyze_debt_book(&DebtBookInput {
                debts: rec_input.debts,
                monthly_income: Some(metrics.total_income),
            })?
            .result,
        )
    };

    let goal_book = if rec_input.goals.is_empty() {
        None
    } else {
        Some(
            analyze_goals(&GoalAnalysisInput {
                goals: rec_input.goals,
                savings_capacity: metrics.savings_capacity,
                monthly_savings: rec_input.profile.monthly_savings,
            })?
            .result,
        )
    };

    let recs = generate_recommendations(
        &rec_input.profile,
        &metrics,
        debt_book.as_ref(),
        goal_book.as_ref(),
    );
    Ok(serde_json::to_value(recs)?)
}
