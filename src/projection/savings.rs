//! Savings goal projection
//!
//! Grows a balance by monthly contributions plus compounded returns until it
//! reaches a target, recording an annual milestone along the way.

use crate::error::ProjectionError;
use crate::projection::MAX_PAYOFF_MONTHS;
use log::warn;
use serde::Serialize;

/// Snapshot taken every 12 simulated months and on the month the goal is
/// reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsMilestone {
    pub month: u32,
    pub balance: f64,
    /// Starting balance plus contributions through this month.
    pub contributed: f64,
    /// Cumulative earned interest through this month.
    pub interest: f64,
}

/// Result of growing savings toward a target.
#[derive(Debug, Clone, Serialize)]
pub struct SavingsGoalOutcome {
    /// Months until the balance first met the target, or
    /// [`MAX_PAYOFF_MONTHS`] if the goal was not reached in time.
    pub months_to_goal: u32,
    pub years_to_goal: f64,
    /// Starting balance plus every monthly contribution.
    pub total_contributed: f64,
    pub total_interest: f64,
    pub final_balance: f64,
    pub milestones: Vec<SavingsMilestone>,
}

/// Project how long reaching a savings target takes.
///
/// Each month credits one month of return on the running balance and then
/// adds the contribution. A starting balance at or above the target returns
/// immediately with zero months. The contribution must be positive; without
/// it a below-target balance could never advance at zero return. Like the
/// payoff simulators, a run that hits [`MAX_PAYOFF_MONTHS`] reports the cap
/// as its month count rather than failing.
pub fn savings_goal(
    target: f64,
    current: f64,
    monthly_contribution: f64,
    annual_return_pct: f64,
) -> Result<SavingsGoalOutcome, ProjectionError> {
    if monthly_contribution <= 0.0 {
        return Err(ProjectionError::NonPositiveContribution);
    }

    let monthly_rate = annual_return_pct / 100.0 / 12.0;
    let mut balance = current;
    let mut months = 0u32;
    let mut milestones = Vec::new();

    while balance < target && months < MAX_PAYOFF_MONTHS {
        months += 1;
        let interest = balance * monthly_rate;
        balance += interest + monthly_contribution;

        if months % 12 == 0 || balance >= target {
            let contributed = current + monthly_contribution * months as f64;
            milestones.push(SavingsMilestone {
                month: months,
                balance,
                contributed,
                interest: balance - contributed,
            });
        }
    }

    if balance < target {
        warn!(
            "savings goal not reached within {} months",
            MAX_PAYOFF_MONTHS
        );
    }

    let total_contributed = current + monthly_contribution * months as f64;
    Ok(SavingsGoalOutcome {
        months_to_goal: months,
        years_to_goal: months as f64 / 12.0,
        total_contributed,
        total_interest: balance - total_contributed,
        final_balance: balance,
        milestones,
    })
}
