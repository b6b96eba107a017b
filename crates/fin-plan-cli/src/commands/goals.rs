use clap::Args;
use serde_json::Value;

use fin_plan_core::goals::progress::{self, GoalAnalysisInput};

use crate::input;

#[derive(Args)]
pub struct GoalsArgs {
    /// Path to JSON input file with goals and savings figures
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_goals(args: GoalsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let goal_input: GoalAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for goal analysis".into());
    };

    let result = progress::analyze_goals(&goal_input)?;
    Ok(serde_json::to_value(result)?)
}
