//! Input records consumed by the projection engine
//!
//! All records are caller-owned, read-only inputs supplied by the tracker's
//! store. The engine never mutates them and keeps no state between calls.
//! Amounts are `f64` in 2-decimal currency units.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Account categories tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
}

/// A cash or asset account. Projections only read the balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub kind: AccountKind,
    pub balance: f64,
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

/// A historical ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    /// Spending category; the trend analyzer buckets an empty value as "Other".
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
}

/// Debt categories from the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    Mortgage,
    Auto,
    Student,
    Personal,
    CreditCard,
    Medical,
    #[default]
    Other,
}

/// An outstanding debt.
///
/// `name` must be unique within one simulation run: payoff results are keyed
/// by it. `interest_rate` is the annual rate in percent (e.g. 19.99), the
/// same convention as [`LoanTerms::annual_rate_pct`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    #[serde(default)]
    pub kind: DebtKind,
    #[serde(default)]
    pub original_balance: Option<f64>,
    pub current_balance: f64,
    pub interest_rate: f64,
    pub minimum_payment: f64,
    #[serde(default)]
    pub remaining_months: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

/// Direction of a recurring flow. Unlike [`TransactionKind`] there is no
/// transfer variant: a recurring item either adds to or drains the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    Income,
    Expense,
}

/// How often a recurring item occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annually,
}

/// A recurring income or expense item (salary, rent, subscription...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringItem {
    pub name: String,
    pub direction: FlowDirection,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
}

impl RecurringItem {
    /// Number of times this item occurs in the calendar month containing
    /// `month_start` (the first of the month).
    ///
    /// The mapping is the tracker's historical approximation and is kept
    /// bit-for-bit: weekly is a flat 4, biweekly a flat 2, quarterly fires
    /// in January/April/July/October regardless of the start date, and
    /// annually fires whenever the calendar month matches the start date's
    /// month. Only daily looks at the actual month length.
    pub fn occurrences_in(&self, month_start: NaiveDate) -> u32 {
        match self.frequency {
            Frequency::Daily => days_in_month(month_start),
            Frequency::Weekly => 4,
            Frequency::Biweekly => 2,
            Frequency::Monthly => 1,
            Frequency::Quarterly => match month_start.month() {
                1 | 4 | 7 | 10 => 1,
                _ => 0,
            },
            Frequency::Annually => {
                if month_start.month() == self.start_date.month() {
                    1
                } else {
                    0
                }
            }
        }
    }

    /// Total contribution of this item within the given calendar month.
    pub fn amount_in(&self, month_start: NaiveDate) -> f64 {
        self.amount * self.occurrences_in(month_start) as f64
    }
}

/// Terms of a fixed-rate installment loan, used to derive the fixed monthly
/// payment via the standard annuity formula.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual interest rate in percent; 0 means a pure linear payoff.
    pub annual_rate_pct: f64,
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_pct: f64, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            term_months,
        }
    }

    /// Monthly interest rate as a fraction (annual percent / 100 / 12).
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct / 100.0 / 12.0
    }
}

/// Everything the engine consumes in one bundle, as handed over by the
/// store. Loaders and the CLI build these; library callers may as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub recurring: Vec<RecurringItem>,
}

/// First day of the calendar month containing `date`.
pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the calendar month containing `date`.
pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First of the following month always exists.
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or(date);
    first_of_next.pred_opt().map(|d| d.day()).unwrap_or(30)
}
