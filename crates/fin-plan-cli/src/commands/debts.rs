use clap::Args;
use serde_json::Value;

use fin_plan_core::debts::book::{self, DebtBookInput};

use crate::input;

#[derive(Args)]
pub struct DebtsArgs {
    /// Path to JSON input file with the debt book
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_debts(args: DebtsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let book_input: DebtBookInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for debt analysis".into());
    };

    let result = book::analyze_debt_book(&book_input)?;
    Ok(serde_json::to_value(result)?)
}
