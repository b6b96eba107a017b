use clap::Args;
use serde_json::Value;

use fin_plan_core::dashboard::summary::{self, DashboardInput};

use crate::input;

#[derive(Args)]
pub struct DashboardArgs {
    /// Path to JSON input file with the profile and its records
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_dashboard(args: DashboardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dash_input: DashboardInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for the dashboard".into());
    };

    let result = summary::assemble_dashboard(&dash_input)?;
    Ok(serde_json::to_value(result)?)
}
