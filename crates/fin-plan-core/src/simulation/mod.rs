pub mod amortization;
pub mod loan;
