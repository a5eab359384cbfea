//! Projection engine for loans, debts, cash flow, savings, and trends
//!
//! Every operation is a pure function over caller-supplied records: no
//! clocks, no I/O, no shared state. Calendar-dependent operations take the
//! anchor date explicitly so results are reproducible.

mod amortization;
mod debt_plan;
mod forecast;
mod savings;
mod trends;

pub use amortization::{
    credit_card_payoff, generate_schedule, simulate_extra_payments, AmortizationSchedule,
    CreditCardPayoff, ExtraPaymentOutcome, ScheduledPayment,
};
pub use debt_plan::{
    compare_strategies, simulate_payoff, DebtPayoff, DebtPlanOutcome, PayoffMethod,
    StrategyComparison, TimelineDebt, TimelineMonth,
};
pub use forecast::{forecast_cash_flow, project_balance, BalanceProjection, ForecastMonth};
pub use savings::{savings_goal, SavingsGoalOutcome, SavingsMilestone};
pub use trends::{analyze_spending_trends, MonthlyTotal, SpendingTrends, TrendDirection};

// ============================================================================
// Convergence Limits
// ============================================================================
// Open-ended payoff loops stop at these bounds instead of erroring. A capped
// run returns a best-effort partial result; callers detect the cap through
// the payoff outcome (converged() or a None payoff month).

/// Balances below this are snapped to zero to absorb float residue.
pub const BALANCE_EPSILON: f64 = 0.01;

/// Hard stop for open-ended payoff and savings loops (50 years).
pub const MAX_PAYOFF_MONTHS: u32 = 600;
