//! Spending trend analysis over historical transactions
//!
//! Aggregates ledger history by category and calendar month, then fits an
//! ordinary least-squares line through the monthly expense series to
//! classify the spending direction.

use crate::records::{Transaction, TransactionKind};
use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Direction of the monthly expense series, classified purely by the sign
/// of the regression slope. There is no deadband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Income, expense, and per-category totals for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub income: f64,
    pub expenses: f64,
    pub categories: BTreeMap<String, f64>,
}

/// Aggregated spending picture over the analysis window.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingTrends {
    /// Expense totals per category over the whole window.
    pub category_totals: BTreeMap<String, f64>,
    /// Per-month totals keyed by `YYYY-MM`; months without any in-window
    /// income or expense are absent.
    pub monthly_totals: BTreeMap<String, MonthlyTotal>,
    /// Mean over the months present in `monthly_totals`, not over the
    /// requested window.
    pub avg_monthly_expense: f64,
    pub avg_monthly_income: f64,
    pub avg_monthly_savings: f64,
    pub expense_trend: TrendDirection,
    /// Regression slope as a percentage of the average monthly expense;
    /// zero when there are no expenses.
    pub trend_percentage: f64,
}

/// Analyze spending over the trailing `months` window ending at `as_of`.
///
/// Transactions dated between `as_of` minus `months` calendar months and
/// `as_of` inclusive are aggregated; transfers are skipped entirely and
/// never open a month bucket. Empty expense categories fall into "Other".
pub fn analyze_spending_trends(
    transactions: &[Transaction],
    months: u32,
    as_of: NaiveDate,
) -> SpendingTrends {
    let cutoff = as_of - Months::new(months);

    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut monthly_totals: BTreeMap<String, MonthlyTotal> = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.date >= cutoff && t.date <= as_of)
    {
        let month_key = transaction.date.format("%Y-%m").to_string();

        match transaction.kind {
            TransactionKind::Income => {
                monthly_totals.entry(month_key).or_default().income += transaction.amount;
            }
            TransactionKind::Expense => {
                let month = monthly_totals.entry(month_key).or_default();
                month.expenses += transaction.amount;
                let category = if transaction.category.is_empty() {
                    "Other"
                } else {
                    transaction.category.as_str()
                };
                *category_totals.entry(category.to_string()).or_insert(0.0) +=
                    transaction.amount;
                *month.categories.entry(category.to_string()).or_insert(0.0) +=
                    transaction.amount;
            }
            TransactionKind::Transfer => {}
        }
    }

    let month_count = monthly_totals.len() as f64;
    let (avg_monthly_expense, avg_monthly_income) = if monthly_totals.is_empty() {
        (0.0, 0.0)
    } else {
        (
            monthly_totals.values().map(|m| m.expenses).sum::<f64>() / month_count,
            monthly_totals.values().map(|m| m.income).sum::<f64>() / month_count,
        )
    };

    // BTreeMap iteration is key-ordered and YYYY-MM keys sort
    // chronologically, so index order matches month order.
    let monthly_expenses: Vec<f64> = monthly_totals.values().map(|m| m.expenses).collect();
    let slope = series_slope(&monthly_expenses);

    let expense_trend = if slope > 0.0 {
        TrendDirection::Increasing
    } else if slope < 0.0 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };
    let trend_percentage = if avg_monthly_expense > 0.0 {
        slope / avg_monthly_expense * 100.0
    } else {
        0.0
    };

    SpendingTrends {
        category_totals,
        monthly_totals,
        avg_monthly_expense,
        avg_monthly_income,
        avg_monthly_savings: avg_monthly_income - avg_monthly_expense,
        expense_trend,
        trend_percentage,
    }
}

/// Ordinary least-squares slope of `values` against their index. Fewer than
/// two points have no defined slope and yield zero.
fn series_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let n_f = n as f64;
    let sum_x: f64 = (0..n).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| i as f64 * y)
        .sum();
    let sum_x2: f64 = (0..n).map(|i| (i as f64) * (i as f64)).sum();

    (n_f * sum_xy - sum_x * sum_y) / (n_f * sum_x2 - sum_x * sum_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, category: &str, on: NaiveDate) -> Transaction {
        Transaction {
            kind: TransactionKind::Expense,
            description: "expense".into(),
            amount,
            category: category.into(),
            date: on,
        }
    }

    fn income(amount: f64, on: NaiveDate) -> Transaction {
        Transaction {
            kind: TransactionKind::Income,
            description: "income".into(),
            amount,
            category: "Salary".into(),
            date: on,
        }
    }

    fn as_of() -> NaiveDate {
        date(2025, 7, 1)
    }

    #[test]
    fn test_rising_spend_is_classified_increasing() {
        let transactions = vec![
            expense(100.0, "Food", date(2025, 4, 10)),
            expense(200.0, "Food", date(2025, 5, 10)),
            expense(300.0, "Food", date(2025, 6, 10)),
        ];
        let trends = analyze_spending_trends(&transactions, 6, as_of());

        assert_eq!(trends.expense_trend, TrendDirection::Increasing);
        assert_relative_eq!(trends.avg_monthly_expense, 200.0);
        // Slope of (0,100) (1,200) (2,300) is exactly 100 per month.
        assert_relative_eq!(trends.trend_percentage, 50.0, epsilon = 1e-9);
        assert_relative_eq!(trends.category_totals["Food"], 600.0);
    }

    #[test]
    fn test_falling_and_flat_spend_classification() {
        let falling = vec![
            expense(300.0, "Food", date(2025, 4, 10)),
            expense(100.0, "Food", date(2025, 5, 10)),
        ];
        let flat = vec![
            expense(200.0, "Food", date(2025, 4, 10)),
            expense(200.0, "Food", date(2025, 5, 10)),
        ];
        assert_eq!(
            analyze_spending_trends(&falling, 6, as_of()).expense_trend,
            TrendDirection::Decreasing
        );
        assert_eq!(
            analyze_spending_trends(&flat, 6, as_of()).expense_trend,
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_window_cutoff_keeps_the_day_of_month() {
        // 3 months back from Jul 15 is Apr 15; Apr 10 falls outside.
        let transactions = vec![
            expense(999.0, "Old", date(2025, 4, 10)),
            expense(100.0, "Food", date(2025, 4, 20)),
        ];
        let trends = analyze_spending_trends(&transactions, 3, date(2025, 7, 15));

        assert!(!trends.category_totals.contains_key("Old"));
        assert_relative_eq!(trends.avg_monthly_expense, 100.0);
    }

    #[test]
    fn test_averages_use_months_present_not_the_window() {
        // Six-month window, but only two months carry transactions.
        let transactions = vec![
            expense(100.0, "Food", date(2025, 2, 5)),
            expense(300.0, "Food", date(2025, 6, 5)),
        ];
        let trends = analyze_spending_trends(&transactions, 6, as_of());
        assert_relative_eq!(trends.avg_monthly_expense, 200.0);
        assert_eq!(trends.monthly_totals.len(), 2);
    }

    #[test]
    fn test_transfer_only_months_stay_out_of_the_averages() {
        let transactions = vec![
            Transaction {
                kind: TransactionKind::Transfer,
                description: "to savings".into(),
                amount: 500.0,
                category: "".into(),
                date: date(2025, 5, 3),
            },
            expense(300.0, "Food", date(2025, 6, 3)),
        ];
        let trends = analyze_spending_trends(&transactions, 6, as_of());

        // The transfer moves no money and opens no month bucket, so June is
        // the only month in the map and the average is undiluted.
        assert_eq!(trends.monthly_totals.len(), 1);
        assert!(!trends.monthly_totals.contains_key("2025-05"));
        assert_relative_eq!(trends.avg_monthly_expense, 300.0);
        assert_relative_eq!(trends.category_totals["Food"], 300.0);
    }

    #[test]
    fn test_transactions_after_the_window_end_are_excluded() {
        let transactions = vec![
            expense(100.0, "Food", date(2025, 6, 20)),
            expense(9999.0, "Future", date(2026, 1, 1)),
        ];
        let trends = analyze_spending_trends(&transactions, 6, as_of());

        assert!(!trends.category_totals.contains_key("Future"));
        assert_relative_eq!(trends.avg_monthly_expense, 100.0);
        assert_eq!(trends.monthly_totals.len(), 1);
    }

    #[test]
    fn test_income_feeds_savings_average() {
        let transactions = vec![
            income(1000.0, date(2025, 5, 1)),
            expense(400.0, "Food", date(2025, 5, 10)),
            income(1000.0, date(2025, 6, 1)),
            expense(400.0, "Food", date(2025, 6, 10)),
        ];
        let trends = analyze_spending_trends(&transactions, 6, as_of());
        assert_relative_eq!(trends.avg_monthly_income, 1000.0);
        assert_relative_eq!(trends.avg_monthly_savings, 600.0);
        assert_eq!(trends.expense_trend, TrendDirection::Stable);
    }

    #[test]
    fn test_blank_category_buckets_as_other() {
        let transactions = vec![expense(75.0, "", date(2025, 6, 1))];
        let trends = analyze_spending_trends(&transactions, 6, as_of());
        assert_relative_eq!(trends.category_totals["Other"], 75.0);
        assert_relative_eq!(trends.monthly_totals["2025-06"].categories["Other"], 75.0);
    }

    #[test]
    fn test_no_transactions_is_all_zeroes() {
        let trends = analyze_spending_trends(&[], 6, as_of());
        assert!(trends.category_totals.is_empty());
        assert!(trends.monthly_totals.is_empty());
        assert_eq!(trends.avg_monthly_expense, 0.0);
        assert_eq!(trends.expense_trend, TrendDirection::Stable);
        assert_eq!(trends.trend_percentage, 0.0);
    }

    #[test]
    fn test_single_month_has_no_slope() {
        let transactions = vec![expense(250.0, "Food", date(2025, 6, 1))];
        let trends = analyze_spending_trends(&transactions, 6, as_of());
        assert_eq!(trends.expense_trend, TrendDirection::Stable);
        assert_eq!(trends.trend_percentage, 0.0);
    }
}
