//! Fixed-rate loan amortization and revolving payoff
//!
//! Covers the three single-balance simulations: the fixed-payment schedule
//! generator, the extra-payment acceleration simulator, and the credit-card
//! style revolving payoff.

use crate::error::ProjectionError;
use crate::projection::{BALANCE_EPSILON, MAX_PAYOFF_MONTHS};
use crate::records::LoanTerms;
use chrono::{Months, NaiveDate};
use log::warn;
use serde::Serialize;

/// One month of an amortization or payoff schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledPayment {
    /// 1-based month number within the schedule.
    pub month: u32,
    /// Payment date, `month` calendar months after the schedule start.
    pub date: NaiveDate,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Remaining balance after this payment.
    pub balance: f64,
    /// Cumulative interest paid through this month.
    pub total_interest: f64,
    /// Cumulative principal paid through this month.
    pub total_principal: f64,
}

/// Full fixed-payment schedule for a loan.
#[derive(Debug, Clone, Serialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: f64,
    /// Lifetime outlay, `monthly_payment * term_months`.
    pub total_payments: f64,
    pub total_interest: f64,
    pub schedule: Vec<ScheduledPayment>,
}

/// Result of paying a fixed extra amount on top of the scheduled payment.
#[derive(Debug, Clone, Serialize)]
pub struct ExtraPaymentOutcome {
    pub months_to_payoff: u32,
    pub original_months: u32,
    /// Negative when the payoff takes longer than the original term, which
    /// happens when `extra_monthly` is negative.
    pub months_saved: i32,
    pub total_interest: f64,
    /// Baseline schedule interest minus this run's interest.
    pub interest_saved: f64,
    pub schedule: Vec<ScheduledPayment>,
}

/// Result of paying down a revolving balance with a fixed monthly payment.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CreditCardPayoff {
    pub months_to_payoff: u32,
    pub total_interest: f64,
    /// Original balance plus total interest. Derived rather than summed from
    /// per-month payments to avoid accumulating float drift.
    pub total_payments: f64,
}

/// Fixed monthly payment from the standard annuity formula. A zero rate
/// degrades to pure linear amortization.
fn fixed_monthly_payment(terms: &LoanTerms) -> f64 {
    let rate = terms.monthly_rate();
    if rate > 0.0 {
        let growth = (1.0 + rate).powi(terms.term_months as i32);
        terms.principal * (rate * growth) / (growth - 1.0)
    } else {
        terms.principal / terms.term_months as f64
    }
}

/// Generate the full amortization schedule for a fixed-rate loan.
///
/// The schedule always contains exactly `terms.term_months` rows. The fixed
/// payment zeroes the balance on the final row up to float residue, which
/// the epsilon snap absorbs; the loop deliberately does not exit early.
///
/// # Arguments
/// * `terms` - principal, annual rate in percent, and term in months
/// * `start` - schedule anchor; row `m` is dated `m` calendar months later
///
/// # Returns
/// The fixed monthly payment, lifetime totals, and the per-month schedule.
/// Fails only for a zero-month term, which has no defined payment.
pub fn generate_schedule(
    terms: &LoanTerms,
    start: NaiveDate,
) -> Result<AmortizationSchedule, ProjectionError> {
    if terms.term_months == 0 {
        return Err(ProjectionError::ZeroTerm);
    }

    let monthly_rate = terms.monthly_rate();
    let monthly_payment = fixed_monthly_payment(terms);

    let mut schedule = Vec::with_capacity(terms.term_months as usize);
    let mut balance = terms.principal;
    let mut total_interest = 0.0;

    for month in 1..=terms.term_months {
        let interest = balance * monthly_rate;
        let principal = monthly_payment - interest;
        balance -= principal;
        if balance < BALANCE_EPSILON {
            balance = 0.0;
        }
        total_interest += interest;

        schedule.push(ScheduledPayment {
            month,
            date: start + Months::new(month),
            payment: monthly_payment,
            principal,
            interest,
            balance,
            total_interest,
            total_principal: terms.principal - balance,
        });
    }

    Ok(AmortizationSchedule {
        monthly_payment,
        total_payments: monthly_payment * terms.term_months as f64,
        total_interest,
        schedule,
    })
}

/// Simulate paying `extra_monthly` on top of the fixed payment each month.
///
/// Simulated month-by-month rather than in closed form since the extra
/// payment changes the payoff trajectory. The loop stops when the balance
/// reaches zero or after twice the original term, whichever comes first;
/// hitting the cap returns the partial schedule as-is. Interest saved is
/// measured against the baseline schedule from [`generate_schedule`].
pub fn simulate_extra_payments(
    terms: &LoanTerms,
    extra_monthly: f64,
    start: NaiveDate,
) -> Result<ExtraPaymentOutcome, ProjectionError> {
    let baseline = generate_schedule(terms, start)?;
    let monthly_rate = terms.monthly_rate();
    let actual_payment = baseline.monthly_payment + extra_monthly;
    let month_cap = terms.term_months * 2;

    let mut schedule = Vec::new();
    let mut balance = terms.principal;
    let mut total_interest = 0.0;
    let mut month = 0u32;

    while balance > 0.0 && month < month_cap {
        month += 1;
        let interest = balance * monthly_rate;
        // Never pay past the remaining balance.
        let principal = (actual_payment - interest).min(balance);
        balance -= principal;
        if balance < BALANCE_EPSILON {
            balance = 0.0;
        }
        total_interest += interest;

        schedule.push(ScheduledPayment {
            month,
            date: start + Months::new(month),
            payment: principal + interest,
            principal,
            interest,
            balance,
            total_interest,
            total_principal: terms.principal - balance,
        });
    }

    if balance > 0.0 {
        warn!(
            "extra-payment payoff did not converge within {} months",
            month_cap
        );
    }

    Ok(ExtraPaymentOutcome {
        months_to_payoff: month,
        original_months: terms.term_months,
        months_saved: terms.term_months as i32 - month as i32,
        total_interest,
        interest_saved: baseline.total_interest - total_interest,
        schedule,
    })
}

/// Simulate paying down a revolving balance with a fixed monthly payment.
///
/// Fails up front when the payment does not cover even the first month's
/// interest, since the balance would grow without bound. Otherwise the
/// payoff is simulated to completion or [`MAX_PAYOFF_MONTHS`], whichever
/// comes first; a capped run reports `months_to_payoff` equal to the cap.
pub fn credit_card_payoff(
    balance: f64,
    apr_pct: f64,
    monthly_payment: f64,
) -> Result<CreditCardPayoff, ProjectionError> {
    let monthly_rate = apr_pct / 100.0 / 12.0;
    let monthly_interest = balance * monthly_rate;
    if monthly_payment <= monthly_interest {
        return Err(ProjectionError::PaymentTooLow {
            payment: monthly_payment,
            monthly_interest,
        });
    }

    let original_balance = balance;
    let mut balance = balance;
    let mut total_interest = 0.0;
    let mut month = 0u32;

    while balance > 0.0 && month < MAX_PAYOFF_MONTHS {
        month += 1;
        let interest = balance * monthly_rate;
        total_interest += interest;
        let principal = (monthly_payment - interest).min(balance);
        balance -= principal;
        if balance < BALANCE_EPSILON {
            balance = 0.0;
        }
    }

    if balance > 0.0 {
        warn!(
            "revolving payoff did not converge within {} months",
            MAX_PAYOFF_MONTHS
        );
    }

    Ok(CreditCardPayoff {
        months_to_payoff: month,
        total_interest,
        total_payments: original_balance + total_interest,
    })
}
