use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fin_plan_core::profile::metrics::{self, FinancialProfile};

use crate::input;

/// Arguments for profile affordability metrics
#[derive(Args)]
pub struct ProfileArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Net monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Other recurring income
    #[arg(long, default_value = "0")]
    pub other_income: Decimal,

    /// Fixed monthly expenses
    #[arg(long)]
    pub fixed_expenses: Option<Decimal>,

    /// Amount put aside each month
    #[arg(long)]
    pub monthly_savings: Option<Decimal>,

    /// Savings accumulated so far
    #[arg(long, default_value = "0")]
    pub current_savings: Decimal,

    /// Credit score (300-850)
    #[arg(long)]
    pub credit_score: Option<u16>,
}

pub fn run_profile(args: ProfileArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile: FinancialProfile = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FinancialProfile {
            id: 0,
            monthly_income: args.monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            other_income: args.other_income,
            fixed_expenses: args.fixed_expenses
                .ok_or("--fixed-expenses is required (or provide --input)")?,
            monthly_savings: args.monthly_savings
                .ok_or("--monthly-savings is required (or provide --input)")?,
            current_savings: args.current_savings,
            credit_score: args.credit_score,
        }
    };

    let result = metrics::analyze_profile(&profile)?;
    Ok(serde_json::to_value(result)?)
}
