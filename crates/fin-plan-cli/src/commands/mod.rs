pub mod dashboard;
pub mod debts;
pub mod goals;
pub mod profile;
pub mod recommendations;
pub mod simulation;
