//! Error types for the projection engine and record loaders.

use thiserror::Error;

/// Guard failures surfaced by projection operations.
///
/// These are expected-condition results, not panics: a caller asking for a
/// payoff that can never converge gets a typed value back and decides what
/// to render. Hitting a hard month cap is not an error; capped runs return
/// best-effort partial results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Loan term of zero months would divide by zero in the payment formula.
    #[error("loan term must be at least one month")]
    ZeroTerm,

    /// Revolving payoff where the payment does not cover the first month's
    /// interest accrual; the balance would grow forever.
    #[error("payment {payment:.2} too low to pay off balance: first month's interest is {monthly_interest:.2}")]
    PaymentTooLow {
        payment: f64,
        monthly_interest: f64,
    },

    /// Savings goal with no positive monthly contribution never advances.
    #[error("monthly contribution must be positive")]
    NonPositiveContribution,
}

/// Errors raised while loading input records from CSV or JSON.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Scenario JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
