//! Fixed-rate loan amortization.
//!
//! Every function here is a pure computation over already-validated
//! values: `term_months >= 1`, amounts non-negative, rates per month as
//! decimal fractions. Range checks live at the simulation boundary
//! (`loan::analyze_loan_simulation`), not here.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// A single month in an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

/// Compute (1 + r)^n via iterative multiplication (avoids power-function
/// drift across hundreds of compounding periods).
fn compound(rate: Rate, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

/// Fixed monthly payment that fully repays `loan_amount` over `term_months`.
///
/// Zero-rate loans repay straight-line; the annuity formula would divide
/// by zero there.
pub fn monthly_payment(loan_amount: Money, monthly_rate: Rate, term_months: u32) -> Money {
    if monthly_rate.is_zero() {
        return loan_amount / Decimal::from(term_months);
    }

    let factor = compound(monthly_rate, term_months);
    loan_amount * (monthly_rate * factor) / (factor - Decimal::ONE)
}

/// Total paid over the life of the loan, closing costs included.
pub fn total_payment(monthly_payment: Money, term_months: u32, additional_costs: Money) -> Money {
    monthly_payment * Decimal::from(term_months) + additional_costs
}

/// Interest portion of the total payment.
pub fn total_interest(total_payment: Money, loan_amount: Money, additional_costs: Money) -> Money {
    total_payment - loan_amount - additional_costs
}

/// Whether the payment fits the borrower's debt capacity.
///
/// No linked capacity figure means not viable, never an error.
pub fn is_viable(monthly_payment: Money, debt_capacity: Option<Money>) -> bool {
    match debt_capacity {
        Some(capacity) => monthly_payment <= capacity,
        None => false,
    }
}

/// Month-by-month breakdown of each payment into principal and interest.
///
/// Recomputed in full on every call; no state is kept between calls. The
/// reported balance is clamped at zero so the final row absorbs rounding
/// residue instead of going negative.
pub fn amortization_schedule(
    loan_amount: Money,
    monthly_rate: Rate,
    monthly_payment: Money,
    term_months: u32,
) -> Vec<ScheduleRow> {
    let mut rows = Vec::with_capacity(term_months as usize);
    let mut balance = loan_amount;

    for month in 1..=term_months {
        let interest = balance * monthly_rate;
        let principal = monthly_payment - interest;
        balance -= principal;

        rows.push(ScheduleRow {
            month,
            payment: monthly_payment,
            principal,
            interest,
            balance: balance.max(Decimal::ZERO),
        });
    }

    rows
}
