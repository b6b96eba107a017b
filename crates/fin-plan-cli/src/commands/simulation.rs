use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fin_plan_core::simulation::loan::{
    self, LoanKind, LoanSimulationInput,
};

use crate::input;

/// Arguments for a loan simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan product: mortgage or auto
    #[arg(long, default_value = "mortgage")]
    pub kind: String,

    /// Label for the simulation
    #[arg(long, default_value = "Simulation")]
    pub name: String,

    /// Property (or vehicle) value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment as a percentage of the property value (0-100)
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Annual interest rate as a percentage (0-100)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Insurance, notary and other closing costs
    #[arg(long, default_value = "0")]
    pub additional_costs: Decimal,

    /// Maximum affordable monthly payment (from the borrower's profile)
    #[arg(long)]
    pub debt_capacity: Option<Decimal>,
}

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan product: mortgage or auto
    #[arg(long, default_value = "mortgage")]
    pub kind: String,

    /// Label for the simulation
    #[arg(long, default_value = "Simulation")]
    pub name: String,

    /// Property (or vehicle) value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment as a percentage of the property value (0-100)
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Annual interest rate as a percentage (0-100)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Only show the first N months
    #[arg(long)]
    pub months: Option<u32>,
}

fn parse_loan_kind(kind: &str) -> Result<LoanKind, Box<dyn std::error::Error>> {
    match kind.to_lowercase().as_str() {
        "mortgage" => Ok(LoanKind::Mortgage),
        "auto" => Ok(LoanKind::Auto),
        _ => Err(format!("Unknown loan kind '{kind}'. Use: mortgage, auto").into()),
    }
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: LoanSimulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanSimulationInput {
            kind: parse_loan_kind(&args.kind)?,
            name: args.name,
            property_value: args.property_value
                .ok_or("--property-value is required (or provide --input)")?,
            down_payment_pct: args.down_payment_pct
                .ok_or("--down-payment-pct is required (or provide --input)")?,
            annual_rate_pct: args.annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args.term_years
                .ok_or("--term-years is required (or provide --input)")?,
            additional_costs: args.additional_costs,
        }
    };

    let result = loan::analyze_loan_simulation(&sim_input, args.debt_capacity)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: LoanSimulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanSimulationInput {
            kind: parse_loan_kind(&args.kind)?,
            name: args.name,
            property_value: args.property_value
                .ok_or("--property-value is required (or provide --input)")?,
            down_payment_pct: args.down_payment_pct
                .ok_or("--down-payment-pct is required (or provide --input)")?,
            annual_rate_pct: args.annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args.term_years
                .ok_or("--term-years is required (or provide --input)")?,
            additional_costs: Decimal::ZERO,
        }
    };

    let result = loan::build_schedule(&sim_input, args.months)?;
    Ok(serde_json::to_value(result)?)
}
