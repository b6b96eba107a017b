mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::dashboard::DashboardArgs;
use commands::debts::DebtsArgs;
use commands::goals::GoalsArgs;
use commands::profile::ProfileArgs;
use commands::recommendations::RecommendArgs;
use commands::simulation::{ScheduleArgs, SimulateArgs};

/// Personal financial planning calculations
#[derive(Parser)]
#[command(
    name = "fpa",
    version,
    about = "Personal financial planning calculations",
    long_about = "A CLI for personal financial planning with decimal precision. \
                  Simulates mortgage and auto loans with full amortization \
                  schedules, derives affordability metrics from a financial \
                  profile, and summarizes debts, savings goals, and \
                  recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a mortgage or auto loan and check viability
    Simulate(SimulateArgs),
    /// Print the amortization schedule for a loan simulation
    Schedule(ScheduleArgs),
    /// Derive affordability metrics from a financial profile
    Profile(ProfileArgs),
    /// Summarize a debt book
    Debts(DebtsArgs),
    /// Evaluate savings goals against saving capacity
    Goals(GoalsArgs),
    /// Generate prioritized recommendations for a profile
    Recommend(RecommendArgs),
    /// Assemble the full per-user dashboard
    Dashboard(DashboardArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulation::run_simulate(args),
        Commands::Schedule(args) => commands::simulation::run_schedule(args),
        Commands::Profile(args) => commands::profile::run_profile(args),
        Commands::Debts(args) => commands::debts::run_debts(args),
        Commands::Goals(args) => commands::goals::run_goals(args),
        Commands::Recommend(args) => commands::recommendations::run_recommend(args),
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args),
        Commands::Version => {
            println!("fpa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
