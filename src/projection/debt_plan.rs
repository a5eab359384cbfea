//! Multi-debt payoff simulation with avalanche/snowball ordering
//!
//! Simulates paying a set of debts with their minimum payments plus a shared
//! extra pool directed at one target debt per month. When a debt closes, its
//! minimum payment rolls into the pool for subsequent months.

use crate::projection::{BALANCE_EPSILON, MAX_PAYOFF_MONTHS};
use crate::records::Debt;
use log::warn;
use serde::{Deserialize, Serialize};

/// Which debt the extra pool targets first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffMethod {
    /// Highest interest rate first.
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

/// Payoff month for one debt, in strategy order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtPayoff {
    pub name: String,
    /// 1-based month the balance reached zero, or `None` if the simulation
    /// hit the month cap with a balance still outstanding.
    pub payoff_month: Option<u32>,
}

/// Snapshot of one debt at the end of a simulated month.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineDebt {
    pub name: String,
    pub balance: f64,
    pub paid_off: bool,
}

/// End-of-month balances for every debt in the plan.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineMonth {
    pub month: u32,
    pub debts: Vec<TimelineDebt>,
}

/// Result of a multi-debt payoff simulation.
#[derive(Debug, Clone, Serialize)]
pub struct DebtPlanOutcome {
    /// Months simulated; equals [`MAX_PAYOFF_MONTHS`] when capped.
    pub total_months: u32,
    pub total_interest_paid: f64,
    pub payoff_order: Vec<DebtPayoff>,
    pub timeline: Vec<TimelineMonth>,
}

impl DebtPlanOutcome {
    /// True when every debt reached zero within the month cap.
    pub fn converged(&self) -> bool {
        self.payoff_order.iter().all(|d| d.payoff_month.is_some())
    }
}

/// Side-by-side strategy outcomes for the same debt set.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyComparison {
    /// Minimum payments only, avalanche order.
    pub avalanche: DebtPlanOutcome,
    /// Minimum payments only, snowball order.
    pub snowball: DebtPlanOutcome,
    pub avalanche_extra: DebtPlanOutcome,
    pub snowball_extra: DebtPlanOutcome,
    /// Strategy whose minimum-only run pays less total interest; ties go to
    /// snowball.
    pub recommended: PayoffMethod,
}

/// Working state for one debt during simulation.
struct DebtState<'a> {
    debt: &'a Debt,
    balance: f64,
    paid_off: bool,
    payoff_month: Option<u32>,
}

impl<'a> DebtState<'a> {
    fn new(debt: &'a Debt) -> Self {
        Self {
            debt,
            balance: debt.current_balance,
            paid_off: false,
            payoff_month: None,
        }
    }
}

/// Simulate paying off `debts` with minimums plus `extra_payment` per month.
///
/// Debts are ordered by the strategy (stable, so rate or balance ties keep
/// input order) and each month the first unpaid debt in that order receives
/// the whole extra pool on top of its minimum. Payments are capped at
/// balance plus accrued interest. A debt whose balance falls to the epsilon
/// snaps to zero, and its minimum payment joins the pool starting the
/// following month; the pool for a month is fixed before any debt is paid.
///
/// The simulation stops when every debt is paid or after
/// [`MAX_PAYOFF_MONTHS`], whichever comes first. A capped run is a valid
/// partial result: unpaid debts carry `payoff_month: None` and
/// [`DebtPlanOutcome::converged`] returns false.
pub fn simulate_payoff(debts: &[Debt], extra_payment: f64, method: PayoffMethod) -> DebtPlanOutcome {
    let mut states: Vec<DebtState> = debts.iter().map(DebtState::new).collect();
    match method {
        PayoffMethod::Avalanche => {
            states.sort_by(|a, b| b.debt.interest_rate.total_cmp(&a.debt.interest_rate))
        }
        PayoffMethod::Snowball => {
            states.sort_by(|a, b| a.debt.current_balance.total_cmp(&b.debt.current_balance))
        }
    }

    let mut month = 0u32;
    let mut total_interest_paid = 0.0;
    let mut available_extra = extra_payment;
    let mut timeline = Vec::new();

    while states.iter().any(|s| !s.paid_off) && month < MAX_PAYOFF_MONTHS {
        month += 1;

        // Fix both the pool and its target before paying anyone: a minimum
        // freed this month only enlarges next month's pool, and a target
        // that closes mid-month must not leak its extra to the next debt.
        let month_extra = available_extra;
        let target = states.iter().position(|s| !s.paid_off);

        for (idx, state) in states.iter_mut().enumerate() {
            if state.paid_off {
                continue;
            }
            let monthly_rate = state.debt.interest_rate / 100.0 / 12.0;
            let interest = state.balance * monthly_rate;
            total_interest_paid += interest;

            let mut payment = state.debt.minimum_payment;
            if target == Some(idx) {
                payment += month_extra;
            }
            payment = payment.min(state.balance + interest);
            state.balance -= payment - interest;

            if state.balance <= BALANCE_EPSILON {
                state.balance = 0.0;
                state.paid_off = true;
                state.payoff_month = Some(month);
                available_extra += state.debt.minimum_payment;
            }
        }

        timeline.push(TimelineMonth {
            month,
            debts: states
                .iter()
                .map(|s| TimelineDebt {
                    name: s.debt.name.clone(),
                    balance: s.balance,
                    paid_off: s.paid_off,
                })
                .collect(),
        });
    }

    if states.iter().any(|s| !s.paid_off) {
        warn!(
            "debt plan did not converge within {} months",
            MAX_PAYOFF_MONTHS
        );
    }

    DebtPlanOutcome {
        total_months: month,
        total_interest_paid,
        payoff_order: states
            .iter()
            .map(|s| DebtPayoff {
                name: s.debt.name.clone(),
                payoff_month: s.payoff_month,
            })
            .collect(),
        timeline,
    }
}

/// Run both strategies with and without the extra payment and recommend the
/// one whose minimum-only run pays less total interest (ties recommend
/// snowball). Returns `None` for an empty debt set.
pub fn compare_strategies(debts: &[Debt], extra_payment: f64) -> Option<StrategyComparison> {
    if debts.is_empty() {
        return None;
    }

    let avalanche = simulate_payoff(debts, 0.0, PayoffMethod::Avalanche);
    let snowball = simulate_payoff(debts, 0.0, PayoffMethod::Snowball);
    let avalanche_extra = simulate_payoff(debts, extra_payment, PayoffMethod::Avalanche);
    let snowball_extra = simulate_payoff(debts, extra_payment, PayoffMethod::Snowball);

    let recommended = if avalanche.total_interest_paid < snowball.total_interest_paid {
        PayoffMethod::Avalanche
    } else {
        PayoffMethod::Snowball
    };

    Some(StrategyComparison {
        avalanche,
        snowball,
        avalanche_extra,
        snowball_extra,
        recommended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn debt(name: &str, rate: f64, balance: f64, minimum: f64) -> Debt {
        Debt {
            name: name.into(),
            kind: Default::default(),
            original_balance: None,
            current_balance: balance,
            interest_rate: rate,
            minimum_payment: minimum,
            remaining_months: None,
            start_date: None,
        }
    }

    /// 24% on 500 vs 10% on 2000: avalanche and snowball happen to agree.
    fn small_hot_large_cold() -> Vec<Debt> {
        vec![debt("A", 24.0, 500.0, 25.0), debt("B", 10.0, 2000.0, 50.0)]
    }

    #[test]
    fn test_avalanche_pays_highest_rate_first() {
        let outcome = simulate_payoff(&small_hot_large_cold(), 100.0, PayoffMethod::Avalanche);
        assert_eq!(outcome.payoff_order[0].name, "A");
        // 500 at 2%/month with 125/month closes in month 5.
        assert_eq!(outcome.payoff_order[0].payoff_month, Some(5));
        assert!(outcome.converged());
        let a_month = outcome.payoff_order[0].payoff_month.unwrap();
        let b_month = outcome.payoff_order[1].payoff_month.unwrap();
        assert!(a_month < b_month);
    }

    #[test]
    fn test_snowball_pays_smallest_balance_first() {
        let outcome = simulate_payoff(&small_hot_large_cold(), 100.0, PayoffMethod::Snowball);
        assert_eq!(outcome.payoff_order[0].name, "A");
        assert_eq!(outcome.payoff_order[0].payoff_month, Some(5));
    }

    #[test]
    fn test_strategies_differ_when_rate_and_size_disagree() {
        // Smallest balance carries the lowest rate, so the orders flip.
        let debts = vec![debt("Low", 5.0, 500.0, 25.0), debt("Hot", 20.0, 2000.0, 50.0)];
        let avalanche = simulate_payoff(&debts, 100.0, PayoffMethod::Avalanche);
        let snowball = simulate_payoff(&debts, 100.0, PayoffMethod::Snowball);
        assert_eq!(avalanche.payoff_order[0].name, "Hot");
        assert_eq!(snowball.payoff_order[0].name, "Low");
        assert!(avalanche.total_interest_paid < snowball.total_interest_paid);
    }

    #[test]
    fn test_rate_ties_keep_input_order() {
        let debts = vec![debt("C", 12.0, 1000.0, 30.0), debt("D", 12.0, 800.0, 30.0)];
        let outcome = simulate_payoff(&debts, 50.0, PayoffMethod::Avalanche);
        assert_eq!(outcome.payoff_order[0].name, "C");
        assert_eq!(outcome.payoff_order[1].name, "D");
    }

    #[test]
    fn test_freed_minimum_joins_pool_the_following_month() {
        // Zero rates make the ledger exact. A closes in month 1; its 100
        // minimum must reach B in month 2, not month 1.
        let debts = vec![debt("A", 0.0, 100.0, 100.0), debt("B", 0.0, 1000.0, 10.0)];
        let outcome = simulate_payoff(&debts, 0.0, PayoffMethod::Snowball);

        let b_at = |m: usize| {
            outcome.timeline[m]
                .debts
                .iter()
                .find(|d| d.name == "B")
                .map(|d| d.balance)
                .unwrap()
        };
        assert_eq!(b_at(0), 990.0);
        assert_eq!(b_at(1), 880.0);
    }

    #[test]
    fn test_extra_goes_to_a_single_target_each_month() {
        // A closes in month 1 with room to spare; B still gets only its
        // minimum that month because the target is fixed at month start.
        let debts = vec![debt("A", 0.0, 50.0, 25.0), debt("B", 0.0, 1000.0, 25.0)];
        let outcome = simulate_payoff(&debts, 100.0, PayoffMethod::Avalanche);

        assert_eq!(outcome.payoff_order[0].payoff_month, Some(1));
        let b_month_1 = outcome.timeline[0]
            .debts
            .iter()
            .find(|d| d.name == "B")
            .map(|d| d.balance)
            .unwrap();
        assert_eq!(b_month_1, 975.0);
        let b_month_2 = outcome.timeline[1]
            .debts
            .iter()
            .find(|d| d.name == "B")
            .map(|d| d.balance)
            .unwrap();
        // Month 2 pool: 100 extra plus A's freed 25 minimum.
        assert_eq!(b_month_2, 825.0);
    }

    #[test]
    fn test_minimum_below_interest_hits_the_cap() {
        let debts = vec![debt("Upside Down", 24.0, 10_000.0, 100.0)];
        let outcome = simulate_payoff(&debts, 0.0, PayoffMethod::Avalanche);
        assert_eq!(outcome.total_months, MAX_PAYOFF_MONTHS);
        assert_eq!(outcome.payoff_order[0].payoff_month, None);
        assert!(!outcome.converged());
    }

    #[test]
    fn test_no_debts_is_an_immediate_noop() {
        let outcome = simulate_payoff(&[], 200.0, PayoffMethod::Avalanche);
        assert_eq!(outcome.total_months, 0);
        assert_eq!(outcome.total_interest_paid, 0.0);
        assert!(outcome.payoff_order.is_empty());
        assert!(outcome.timeline.is_empty());
        assert!(outcome.converged());
    }

    #[test]
    fn test_payment_never_exceeds_balance_plus_interest() {
        let debts = vec![debt("Tiny", 12.0, 40.0, 500.0)];
        let outcome = simulate_payoff(&debts, 0.0, PayoffMethod::Snowball);
        assert_eq!(outcome.payoff_order[0].payoff_month, Some(1));
        // Only one month of interest on 40 at 1%/month.
        assert_relative_eq!(outcome.total_interest_paid, 0.40, epsilon = 1e-9);
    }

    #[test]
    fn test_compare_strategies_recommends_the_cheaper_minimum_run() {
        // Three debts so the minimum-only rollover diverges: once Small
        // closes, avalanche sends its freed minimum to Hot while snowball
        // sends it to Cold, leaving Hot accruing at 20%.
        let debts = vec![
            debt("Small", 0.0, 300.0, 100.0),
            debt("Cold", 5.0, 1000.0, 30.0),
            debt("Hot", 20.0, 2000.0, 50.0),
        ];
        let comparison = compare_strategies(&debts, 100.0).unwrap();
        assert_eq!(comparison.recommended, PayoffMethod::Avalanche);
        assert!(
            comparison.avalanche.total_interest_paid < comparison.snowball.total_interest_paid
        );
        // Extra payments can only shorten the avalanche run.
        assert!(
            comparison.avalanche_extra.total_months <= comparison.avalanche.total_months
        );
    }

    #[test]
    fn test_compare_strategies_tie_recommends_snowball() {
        // Interest-free debts make the minimum-only runs exactly equal, so
        // the comparison ties and snowball wins it.
        let debts = vec![debt("A", 0.0, 500.0, 25.0), debt("B", 0.0, 2000.0, 50.0)];
        let comparison = compare_strategies(&debts, 100.0).unwrap();
        assert_eq!(comparison.recommended, PayoffMethod::Snowball);
        assert_eq!(comparison.avalanche.total_interest_paid, 0.0);
        assert_eq!(comparison.snowball.total_interest_paid, 0.0);
    }

    #[test]
    fn test_compare_strategies_empty_is_none() {
        assert!(compare_strategies(&[], 100.0).is_none());
    }
}
