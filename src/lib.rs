//! Finance Projection - projection engine for a personal finance tracker
//!
//! This library provides:
//! - Fixed-rate amortization schedules and extra-payment acceleration
//! - Revolving (credit-card style) payoff simulation
//! - Multi-debt payoff planning with avalanche/snowball ordering
//! - Cash-flow forecasting and balance projection from recurring items
//! - Savings goal projection with compounded returns
//! - Spending trend analysis over transaction history
//!
//! Every operation is a pure function: inputs are caller-owned records,
//! results are plain structures, and calendar anchors are passed explicitly.

pub mod error;
pub mod projection;
pub mod records;

// Re-export commonly used types
pub use error::{LoadError, ProjectionError};
pub use projection::{
    analyze_spending_trends, compare_strategies, credit_card_payoff, forecast_cash_flow,
    generate_schedule, project_balance, savings_goal, simulate_extra_payments, simulate_payoff,
    PayoffMethod,
};
pub use records::{Account, Debt, LoanTerms, RecurringItem, Scenario, Transaction};
