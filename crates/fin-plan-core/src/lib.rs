pub mod error;
pub mod types;

#[cfg(feature = "simulation")]
pub mod simulation;

#[cfg(feature = "profile")]
pub mod profile;

#[cfg(feature = "debts")]
pub mod debts;

#[cfg(feature = "goals")]
pub mod goals;

#[cfg(feature = "recommendations")]
pub mod recommendations;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use error::FinPlanError;
pub use types::*;

/// Standard result type for all fin-plan operations
pub type FinPlanResult<T> = Result<T, FinPlanError>;
