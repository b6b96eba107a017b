//! Rule-based financial recommendations.
//!
//! Each rule inspects the profile metrics (plus optional debt and goal
//! summaries) and emits at most one recommendation. Output is ordered
//! High -> Low, stable within a priority.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::debts::book::DebtBookOutput;
use crate::goals::progress::GoalBookOutput;
use crate::profile::metrics::{FinancialProfile, ProfileMetricsOutput};

/// Emergency fund target, in months of fixed expenses.
const EMERGENCY_FUND_TARGET_MONTHS: Decimal = dec!(3);

/// Credit scores below this get a remediation nudge.
const WEAK_CREDIT_SCORE: u16 = 650;

/// Saving less than this share of capacity counts as idle surplus.
const IDLE_SURPLUS_RATIO: Decimal = dec!(0.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Generate recommendations from a profile snapshot. Pure; nothing is
/// stored, the same inputs always produce the same list.
pub fn generate_recommendations(
    profile: &FinancialProfile,
    metrics: &ProfileMetricsOutput,
    debts: Option<&DebtBookOutput>,
    goals: Option<&GoalBookOutput>,
) -> Vec<Recommendation> {
    let mut recs: Vec<Recommendation> = Vec::new();

    if metrics.savings_capacity < Decimal::ZERO {
        recs.push(Recommendation {
            title: "Spending exceeds income".into(),
            description: format!(
                "Fixed expenses are {} above total income; reduce expenses or the budget cannot hold",
                -metrics.savings_capacity
            ),
            priority: Priority::High,
        });
    }

    if let Some(book) = debts {
        if book.total_monthly_payment > metrics.debt_capacity {
            recs.push(Recommendation {
                title: "Debt service above capacity".into(),
                description: format!(
                    "Monthly debt payments of {} exceed the {} considered affordable; prioritize paying down the most expensive debt",
                    book.total_monthly_payment, metrics.debt_capacity
                ),
                priority: Priority::High,
            });
        }
    }

    if let Some(months) = metrics.emergency_fund_months {
        if months < EMERGENCY_FUND_TARGET_MONTHS {
            recs.push(Recommendation {
                title: "Thin emergency fund".into(),
                description: format!(
                    "Current savings cover {months} months of fixed expenses; build toward {EMERGENCY_FUND_TARGET_MONTHS} months before taking new commitments"
                ),
                priority: Priority::Medium,
            });
        }
    }

    if let Some(book) = goals {
        if book.active_goals > 0 && !book.within_capacity {
            recs.push(Recommendation {
                title: "Goals outpace savings capacity".into(),
                description: format!(
                    "Active goals require {} per month against a capacity of {}; extend a horizon or pause a goal",
                    book.total_required_monthly_saving, metrics.savings_capacity
                ),
                priority: Priority::Medium,
            });
        }
    }

    if let Some(score) = profile.credit_score {
        if score < WEAK_CREDIT_SCORE {
            recs.push(Recommendation {
                title: "Weak credit score".into(),
                description: format!(
                    "A score of {score} will price loans badly; on-time payments and lower card utilization raise it fastest"
                ),
                priority: Priority::Medium,
            });
        }
    }

    if metrics.savings_capacity > Decimal::ZERO
        && profile.monthly_savings < metrics.savings_capacity * IDLE_SURPLUS_RATIO
    {
        recs.push(Recommendation {
            title: "Idle surplus".into(),
            description: format!(
                "Only {} of a possible {} is being saved each month; automate a larger transfer",
                profile.monthly_savings, metrics.savings_capacity
            ),
            priority: Priority::Low,
        });
    }

    recs.sort_by_key(|r| r.priority);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::metrics::analyze_profile;
    use rust_decimal_macros::dec;

    fn profile(income: Decimal, expenses: Decimal, savings: Decimal) -> FinancialProfile {
        FinancialProfile {
            id: 1,
            monthly_income: income,
            other_income: Decimal::ZERO,
            fixed_expenses: expenses,
            monthly_savings: savings,
            current_savings: dec!(100_000),
            credit_score: Some(720),
        }
    }

    fn metrics_for(p: &FinancialProfile) -> ProfileMetricsOutput {
        analyze_profile(p).unwrap().result
    }

    #[test]
    fn test_healthy_profile_yields_nothing() {
        // 20k capacity, 12k saved (> half), 5 months of expenses banked
        let p = profile(dec!(40_000), dec!(20_000), dec!(12_000));
        let m = metrics_for(&p);
        let recs = generate_recommendations(&p, &m, None, None);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_overspending_is_high_priority() {
        let p = profile(dec!(20_000), dec!(25_000), Decimal::ZERO);
        let m = metrics_for(&p);
        let recs = generate_recommendations(&p, &m, None, None);
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].title.contains("Spending"));
    }

    #[test]
    fn test_weak_credit_score_flagged() {
        let mut p = profile(dec!(40_000), dec!(20_000), dec!(12_000));
        p.credit_score = Some(580);
        let m = metrics_for(&p);
        let recs = generate_recommendations(&p, &m, None, None);
        assert!(recs.iter().any(|r| r.title.contains("credit score")));
    }

    #[test]
    fn test_thin_emergency_fund_flagged() {
        let mut p = profile(dec!(40_000), dec!(20_000), dec!(12_000));
        p.current_savings = dec!(20_000); // one month of expenses
        let m = metrics_for(&p);
        let recs = generate_recommendations(&p, &m, None, None);
        assert!(recs.iter().any(|r| r.title.contains("emergency fund")));
    }

    #[test]
    fn test_idle_surplus_is_low_priority() {
        let p = profile(dec!(40_000), dec!(20_000), dec!(2_000));
        let m = metrics_for(&p);
        let recs = generate_recommendations(&p, &m, None, None);
        let idle = recs.iter().find(|r| r.title.contains("Idle")).unwrap();
        assert_eq!(idle.priority, Priority::Low);
    }

    #[test]
    fn test_high_sorts_before_low() {
        // Overspending (High) plus idle surplus cannot coexist; pair
        // overspending with a weak score (Medium) instead
        let mut p = profile(dec!(20_000), dec!(25_000), Decimal::ZERO);
        p.credit_score = Some(600);
        let m = metrics_for(&p);
        let recs = generate_recommendations(&p, &m, None, None);
        assert!(recs.len() >= 2);
        assert_eq!(recs[0].priority, Priority::High);
        for pair in recs.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
        }
    }
}
