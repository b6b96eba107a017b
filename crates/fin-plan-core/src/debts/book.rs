//! Debt book analytics.
//!
//! Covers:
//! 1. **Totals** -- outstanding balance, monthly debt service.
//! 2. **Weighted average rate** -- balance-weighted annual rate.
//! 3. **Breakdown** -- count, balance and share per debt kind.
//! 4. **Debt service ratio** -- monthly service / income, when supplied.
//! 5. **Payoff projection** -- months to clear each debt at its own rate.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::FinPlanError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::FinPlanResult;

/// Payoff projections stop here; anything longer is reported as open-ended.
const MAX_PAYOFF_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DebtKind {
    CreditCard,
    Personal,
    Student,
    Auto,
    Mortgage,
    Other,
}

/// A single outstanding debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRecord {
    pub id: u64,
    pub profile_id: u64,
    pub kind: DebtKind,
    pub name: String,
    pub current_balance: Money,
    pub monthly_payment: Money,
    pub annual_rate_pct: Percent,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
}

impl DebtRecord {
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_pct / dec!(100) / dec!(12)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtBookInput {
    pub debts: Vec<DebtRecord>,
    /// Total monthly income, for the debt-service ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
}

/// Per-kind slice of the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindBreakdown {
    pub kind: DebtKind,
    pub count: u64,
    pub balance: Money,
    pub pct: Decimal,
}

/// Per-debt summary row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtSummaryRow {
    pub id: u64,
    pub name: String,
    pub kind: DebtKind,
    pub balance: Money,
    pub monthly_payment: Money,
    pub annual_rate_pct: Percent,
    /// None when the payment never clears the balance (or not within the cap).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_to_payoff: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtBookOutput {
    pub total_balance: Money,
    pub total_monthly_payment: Money,
    pub weighted_avg_rate: Percent,
    pub breakdown: Vec<KindBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_service_ratio: Option<Rate>,
    pub debts: Vec<DebtSummaryRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Summarize a set of debts: totals, weighted rate, per-kind breakdown,
/// and a payoff projection per debt.
pub fn analyze_debt_book(
    input: &DebtBookInput,
) -> FinPlanResult<ComputationOutput<DebtBookOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_debt_book(input)?;

    let total_balance: Money = input.debts.iter().map(|d| d.current_balance).sum();
    let total_monthly_payment: Money = input.debts.iter().map(|d| d.monthly_payment).sum();

    let weighted_avg_rate = if total_balance.is_zero() {
        Decimal::ZERO
    } else {
        input
            .debts
            .iter()
            .map(|d| d.current_balance * d.annual_rate_pct)
            .sum::<Decimal>()
            / total_balance
    };

    // Per-kind grouping
    let mut by_kind: BTreeMap<DebtKind, (u64, Money)> = BTreeMap::new();
    for debt in &input.debts {
        let entry = by_kind.entry(debt.kind).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += debt.current_balance;
    }
    let breakdown: Vec<KindBreakdown> = by_kind
        .into_iter()
        .map(|(kind, (count, balance))| KindBreakdown {
            kind,
            count,
            balance,
            pct: if total_balance.is_zero() {
                Decimal::ZERO
            } else {
                balance / total_balance
            },
        })
        .collect();

    let debt_service_ratio = match input.monthly_income {
        Some(income) if income > Decimal::ZERO => Some(total_monthly_payment / income),
        Some(_) => {
            warnings.push("Monthly income is zero; debt service ratio omitted".into());
            None
        }
        None => None,
    };

    let debts: Vec<DebtSummaryRow> = input
        .debts
        .iter()
        .map(|debt| {
            let months_to_payoff = project_payoff(debt, &mut warnings);
            DebtSummaryRow {
                id: debt.id,
                name: debt.name.clone(),
                kind: debt.kind,
                balance: debt.current_balance,
                monthly_payment: debt.monthly_payment,
                annual_rate_pct: debt.annual_rate_pct,
                months_to_payoff,
            }
        })
        .collect();

    let output = DebtBookOutput {
        total_balance,
        total_monthly_payment,
        weighted_avg_rate,
        breakdown,
        debt_service_ratio,
        debts,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt book summary",
        &serde_json::json!({
            "debt_count": input.debts.len(),
            "payoff_horizon_months": MAX_PAYOFF_MONTHS,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Run the balance recurrence until the debt clears. None when the payment
/// does not cover accruing interest, or the horizon is exceeded.
fn project_payoff(debt: &DebtRecord, warnings: &mut Vec<String>) -> Option<u32> {
    if debt.current_balance.is_zero() {
        return Some(0);
    }

    let rate = debt.monthly_rate();
    if debt.monthly_payment <= debt.current_balance * rate {
        warnings.push(format!(
            "'{}': payment does not cover accruing interest; balance never amortizes",
            debt.name
        ));
        return None;
    }

    let mut balance = debt.current_balance;
    for month in 1..=MAX_PAYOFF_MONTHS {
        balance += balance * rate;
        balance -= debt.monthly_payment;
        if balance <= Decimal::ZERO {
            return Some(month);
        }
    }

    warnings.push(format!(
        "'{}': payoff exceeds {MAX_PAYOFF_MONTHS} months",
        debt.name
    ));
    None
}

fn validate_debt_book(input: &DebtBookInput) -> FinPlanResult<()> {
    for debt in &input.debts {
        if debt.current_balance < Decimal::ZERO {
            return Err(FinPlanError::InvalidInput {
                field: "current_balance".into(),
                reason: format!("'{}': balance cannot be negative", debt.name),
            });
        }
        if debt.monthly_payment < Decimal::ZERO {
            return Err(FinPlanError::InvalidInput {
                field: "monthly_payment".into(),
                reason: format!("'{}': payment cannot be negative", debt.name),
            });
        }
        if debt.annual_rate_pct < Decimal::ZERO || debt.annual_rate_pct > dec!(100) {
            return Err(FinPlanError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: format!("'{}': rate must be between 0 and 100 percent", debt.name),
            });
        }
    }
    if let Some(income) = input.monthly_income {
        if income < Decimal::ZERO {
            return Err(FinPlanError::InvalidInput {
                field: "monthly_income".into(),
                reason: "Income cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn debt(id: u64, kind: DebtKind, balance: Decimal, payment: Decimal, rate: Decimal) -> DebtRecord {
        DebtRecord {
            id,
            profile_id: 1,
            kind,
            name: format!("debt-{id}"),
            current_balance: balance,
            monthly_payment: payment,
            annual_rate_pct: rate,
            start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            term_months: None,
        }
    }

    fn base_input() -> DebtBookInput {
        DebtBookInput {
            debts: vec![
                debt(1, DebtKind::CreditCard, dec!(1_000), dec!(200), dec!(10)),
                debt(2, DebtKind::Auto, dec!(3_000), dec!(300), dec!(20)),
            ],
            monthly_income: Some(dec!(10_000)),
        }
    }

    #[test]
    fn test_totals() {
        let result = analyze_debt_book(&base_input()).unwrap();
        assert_eq!(result.result.total_balance, dec!(4_000));
        assert_eq!(result.result.total_monthly_payment, dec!(500));
    }

    #[test]
    fn test_weighted_avg_rate() {
        let result = analyze_debt_book(&base_input()).unwrap();
        // (1000*10 + 3000*20) / 4000 = 70,000 / 4,000 = 17.5
        assert_eq!(result.result.weighted_avg_rate, dec!(17.5));
    }

    #[test]
    fn test_breakdown_shares() {
        let result = analyze_debt_book(&base_input()).unwrap();
        let breakdown = &result.result.breakdown;
        assert_eq!(breakdown.len(), 2);

        let cc = breakdown.iter().find(|b| b.kind == DebtKind::CreditCard).unwrap();
        assert_eq!(cc.count, 1);
        assert_eq!(cc.pct, dec!(0.25));
    }

    #[test]
    fn test_debt_service_ratio() {
        let result = analyze_debt_book(&base_input()).unwrap();
        // 500 / 10,000 = 5%
        assert_eq!(result.result.debt_service_ratio, Some(dec!(0.05)));
    }

    #[test]
    fn test_no_income_means_no_ratio() {
        let mut input = base_input();
        input.monthly_income = None;
        let result = analyze_debt_book(&input).unwrap();
        assert_eq!(result.result.debt_service_ratio, None);
    }

    #[test]
    fn test_payoff_zero_rate() {
        let input = DebtBookInput {
            debts: vec![debt(1, DebtKind::Personal, dec!(1_000), dec!(500), Decimal::ZERO)],
            monthly_income: None,
        };
        let result = analyze_debt_book(&input).unwrap();
        // 1000 / 500 per month => cleared in month 2
        assert_eq!(result.result.debts[0].months_to_payoff, Some(2));
    }

    #[test]
    fn test_payoff_with_interest() {
        let input = DebtBookInput {
            debts: vec![debt(1, DebtKind::CreditCard, dec!(1_000), dec!(600), dec!(12))],
            monthly_income: None,
        };
        let result = analyze_debt_book(&input).unwrap();
        // r = 1%: m1 -> 1010 - 600 = 410; m2 -> 414.1 - 600 < 0
        assert_eq!(result.result.debts[0].months_to_payoff, Some(2));
    }

    #[test]
    fn test_payoff_never_amortizes() {
        let input = DebtBookInput {
            debts: vec![debt(1, DebtKind::CreditCard, dec!(10_000), dec!(150), dec!(24))],
            monthly_income: None,
        };
        let result = analyze_debt_book(&input).unwrap();
        // Interest accrues 200/month against a 150 payment
        assert_eq!(result.result.debts[0].months_to_payoff, None);
        assert!(result.warnings.iter().any(|w| w.contains("never amortizes")));
    }

    #[test]
    fn test_empty_book() {
        let input = DebtBookInput { debts: vec![], monthly_income: Some(dec!(10_000)) };
        let result = analyze_debt_book(&input).unwrap();
        assert_eq!(result.result.total_balance, Decimal::ZERO);
        assert_eq!(result.result.weighted_avg_rate, Decimal::ZERO);
        assert_eq!(result.result.debt_service_ratio, Some(Decimal::ZERO));
        assert!(result.result.breakdown.is_empty());
    }

    #[test]
    fn test_negative_balance_rejected() {
        let input = DebtBookInput {
            debts: vec![debt(1, DebtKind::Other, dec!(-5), dec!(10), dec!(5))],
            monthly_income: None,
        };
        assert!(analyze_debt_book(&input).is_err());
    }

    #[test]
    fn test_rate_over_100_rejected() {
        let input = DebtBookInput {
            debts: vec![debt(1, DebtKind::Other, dec!(100), dec!(10), dec!(120))],
            monthly_income: None,
        };
        assert!(analyze_debt_book(&input).is_err());
    }
}
