use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan simulation
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct SimulationBindingInput {
    #[serde(flatten)]
    input: fin_plan_core::simulation::loan::LoanSimulationInput,
    debt_capacity: Option<rust_decimal::Decimal>,
}

#[napi]
pub fn analyze_loan_simulation(input_json: String) -> NapiResult<String> {
    let binding_input: SimulationBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fin_plan_core::simulation::loan::analyze_loan_simulation(
        &binding_input.input,
        binding_input.debt_capacity,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ScheduleBindingInput {
    #[serde(flatten)]
    input: fin_plan_core::simulation::loan::LoanSimulationInput,
    months: Option<u32>,
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let binding_input: ScheduleBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fin_plan_core::simulation::loan::build_schedule(
        &binding_input.input,
        binding_input.months,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[napi]
pub fn profile_metrics(input_json: String) -> NapiResult<String> {
    let input: fin_plan_core::profile::metrics::FinancialProfile =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fin_plan_core::profile::metrics::analyze_profile(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Debts
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_debt_book(input_json: String) -> NapiResult<String> {
    let input: fin_plan_core::debts::book::DebtBookInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fin_plan_core::debts::book::analyze_debt_book(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_goals(input_json: String) -> NapiResult<String> {
    let input: fin_plan_core::goals::progress::GoalAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fin_plan_core::goals::progress::analyze_goals(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[napi]
pub fn assemble_dashboard(input_json: String) -> NapiResult<String> {
    let input: fin_plan_core::dashboard::summary::DashboardInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fin_plan_core::dashboard::summary::assemble_dashboard(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
