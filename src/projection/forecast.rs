//! Cash-flow forecasting from recurring items
//!
//! Projects a household's combined balance forward month by month from the
//! recurring income and expense items. Occurrence counting is calendar-keyed
//! (see [`RecurringItem::occurrences_in`]); items contribute from the first
//! forecast month regardless of their start date, matching the tracker's
//! historical behavior.

use crate::records::{first_of_month, Account, FlowDirection, RecurringItem};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// Months simulated before balance projections fall back to extrapolation.
const EXTRAPOLATION_WINDOW: u32 = 24;

/// One forecasted calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMonth {
    /// Calendar month key, `YYYY-MM`.
    pub month: String,
    /// Display name, e.g. `Jan 2025`.
    pub month_name: String,
    /// Running combined balance at the end of this month.
    pub projected_balance: f64,
    pub income: f64,
    pub expenses: f64,
    pub net_change: f64,
}

/// Projected balance for a single target month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceProjection {
    /// Calendar month key of the target, `YYYY-MM`.
    pub month: String,
    pub projected_balance: f64,
    /// True when the target lies beyond the simulated window and the value
    /// was extended linearly from the window's average net change.
    pub extrapolated: bool,
}

/// Forecast the combined account balance over the coming months.
///
/// Month 0 is the calendar month containing `from`; its recurring flows are
/// applied in full, so the first row already differs from the raw account
/// sum. Each row carries that month's income, expenses, and net change plus
/// the cumulative running balance.
pub fn forecast_cash_flow(
    accounts: &[Account],
    recurring: &[RecurringItem],
    months: u32,
    from: NaiveDate,
) -> Vec<ForecastMonth> {
    let mut running_balance: f64 = accounts.iter().map(|a| a.balance).sum();
    let anchor = first_of_month(from);
    let mut forecast = Vec::with_capacity(months as usize);

    for offset in 0..months {
        let month_start = anchor + Months::new(offset);

        let mut income = 0.0;
        let mut expenses = 0.0;
        for item in recurring {
            let amount = item.amount_in(month_start);
            match item.direction {
                FlowDirection::Income => income += amount,
                FlowDirection::Expense => expenses += amount,
            }
        }

        let net_change = income - expenses;
        running_balance += net_change;

        forecast.push(ForecastMonth {
            month: month_start.format("%Y-%m").to_string(),
            month_name: month_start.format("%b %Y").to_string(),
            projected_balance: running_balance,
            income,
            expenses,
            net_change,
        });
    }

    forecast
}

/// Project the combined balance at an arbitrary future date.
///
/// Targets inside the simulated window read straight from the forecast.
/// Beyond it, the balance is extended linearly using the window's average
/// net change and flagged as extrapolated. A target before the anchor month
/// returns the raw account sum unchanged.
pub fn project_balance(
    accounts: &[Account],
    recurring: &[RecurringItem],
    target: NaiveDate,
    from: NaiveDate,
) -> BalanceProjection {
    let month_key = target.format("%Y-%m").to_string();
    let current_balance: f64 = accounts.iter().map(|a| a.balance).sum();

    let Some(offset) = month_offset(from, target) else {
        return BalanceProjection {
            month: month_key,
            projected_balance: current_balance,
            extrapolated: false,
        };
    };

    let forecast = forecast_cash_flow(accounts, recurring, EXTRAPOLATION_WINDOW, from);
    if let Some(row) = forecast.get(offset as usize) {
        return BalanceProjection {
            month: month_key,
            projected_balance: row.projected_balance,
            extrapolated: false,
        };
    }

    match forecast.last() {
        Some(last) => {
            let avg_net: f64 =
                forecast.iter().map(|f| f.net_change).sum::<f64>() / forecast.len() as f64;
            let months_beyond = offset + 1 - EXTRAPOLATION_WINDOW;
            BalanceProjection {
                month: month_key,
                projected_balance: last.projected_balance + avg_net * months_beyond as f64,
                extrapolated: true,
            }
        }
        None => BalanceProjection {
            month: month_key,
            projected_balance: current_balance,
            extrapolated: false,
        },
    }
}

/// Whole-month offset from the anchor's calendar month to the target's.
/// `None` when the target month precedes the anchor month.
fn month_offset(from: NaiveDate, target: NaiveDate) -> Option<u32> {
    let diff = (target.year() - from.year()) * 12 + target.month() as i32 - from.month() as i32;
    u32::try_from(diff).ok()
}
