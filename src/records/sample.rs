//! Built-in demo scenario
//!
//! A small self-contained household for exercising the engine without any
//! input files. Transaction history is synthesized deterministically
//! relative to the anchor date, with a mild upward drift in spending so the
//! trend analyzer has something to find.

use crate::records::data::{
    first_of_month, Account, AccountKind, Debt, DebtKind, FlowDirection, Frequency, RecurringItem,
    Scenario, Transaction, TransactionKind,
};
use chrono::{Datelike, Months, NaiveDate};

/// Months of synthesized transaction history.
const HISTORY_MONTHS: u32 = 6;

/// Build the demo scenario anchored at `as_of`.
pub fn sample_scenario(as_of: NaiveDate) -> Scenario {
    Scenario {
        accounts: sample_accounts(),
        transactions: sample_transactions(as_of),
        debts: sample_debts(),
        recurring: sample_recurring(as_of),
    }
}

fn sample_accounts() -> Vec<Account> {
    vec![
        Account {
            name: "Everyday Checking".into(),
            kind: AccountKind::Checking,
            balance: 3250.75,
        },
        Account {
            name: "Emergency Fund".into(),
            kind: AccountKind::Savings,
            balance: 11_500.00,
        },
        Account {
            name: "Rewards Visa".into(),
            kind: AccountKind::Credit,
            balance: -1850.25,
        },
        Account {
            name: "Brokerage".into(),
            kind: AccountKind::Investment,
            balance: 24_000.00,
        },
    ]
}

fn sample_debts() -> Vec<Debt> {
    vec![
        Debt {
            name: "Mortgage".into(),
            kind: DebtKind::Mortgage,
            original_balance: Some(260_000.0),
            current_balance: 214_500.0,
            interest_rate: 6.25,
            minimum_payment: 1675.0,
            remaining_months: Some(312),
            start_date: None,
        },
        Debt {
            name: "Car Loan".into(),
            kind: DebtKind::Auto,
            original_balance: Some(28_000.0),
            current_balance: 14_250.0,
            interest_rate: 6.9,
            minimum_payment: 415.0,
            remaining_months: Some(38),
            start_date: None,
        },
        Debt {
            name: "Rewards Visa".into(),
            kind: DebtKind::CreditCard,
            original_balance: None,
            current_balance: 1850.25,
            interest_rate: 22.99,
            minimum_payment: 55.0,
            remaining_months: None,
            start_date: None,
        },
        Debt {
            name: "Student Loan".into(),
            kind: DebtKind::Student,
            original_balance: Some(31_000.0),
            current_balance: 18_400.0,
            interest_rate: 5.5,
            minimum_payment: 210.0,
            remaining_months: None,
            start_date: None,
        },
    ]
}

fn sample_recurring(as_of: NaiveDate) -> Vec<RecurringItem> {
    let start = first_of_month(as_of) - Months::new(HISTORY_MONTHS);
    let item = |name: &str, direction, amount, category: &str, frequency| RecurringItem {
        name: name.into(),
        direction,
        amount,
        category: category.into(),
        frequency,
        start_date: start,
    };
    vec![
        item("Salary", FlowDirection::Income, 2150.0, "Salary", Frequency::Biweekly),
        item("Mortgage Payment", FlowDirection::Expense, 1675.0, "Housing", Frequency::Monthly),
        item("Car Payment", FlowDirection::Expense, 415.0, "Transport", Frequency::Monthly),
        item("Groceries", FlowDirection::Expense, 165.0, "Food", Frequency::Weekly),
        item("Utilities", FlowDirection::Expense, 240.0, "Utilities", Frequency::Monthly),
        item("Streaming Bundle", FlowDirection::Expense, 38.99, "Entertainment", Frequency::Monthly),
        item("Auto Insurance", FlowDirection::Expense, 390.0, "Insurance", Frequency::Quarterly),
        item("Amazon Prime", FlowDirection::Expense, 139.0, "Subscriptions", Frequency::Annually),
    ]
}

/// Synthesize `HISTORY_MONTHS` of ledger history ending the month before
/// `as_of`. Spending drifts upward by a fixed step per month.
fn sample_transactions(as_of: NaiveDate) -> Vec<Transaction> {
    let mut transactions = Vec::new();
    let anchor = first_of_month(as_of);

    for offset in (1..=HISTORY_MONTHS).rev() {
        let month_start = anchor - Months::new(offset);
        // Oldest month gets index 0 so drift grows toward the present.
        let idx = (HISTORY_MONTHS - offset) as f64;

        let entry = |day: u32, kind, description: &str, amount: f64, category: &str| Transaction {
            kind,
            description: description.into(),
            amount,
            category: category.into(),
            date: month_day(month_start, day),
        };

        transactions.push(entry(1, TransactionKind::Income, "Paycheck", 2150.0, "Salary"));
        transactions.push(entry(15, TransactionKind::Income, "Paycheck", 2150.0, "Salary"));

        transactions.push(entry(
            3,
            TransactionKind::Expense,
            "Grocery run",
            610.0 + idx * 18.0,
            "Food",
        ));
        transactions.push(entry(
            5,
            TransactionKind::Expense,
            "Mortgage payment",
            1675.0,
            "Housing",
        ));
        transactions.push(entry(
            8,
            TransactionKind::Expense,
            "Electric and water",
            228.0 + idx * 6.0,
            "Utilities",
        ));
        transactions.push(entry(
            12,
            TransactionKind::Expense,
            "Dinner out",
            86.50 + idx * 4.0,
            "Dining",
        ));
        transactions.push(entry(
            20,
            TransactionKind::Expense,
            "Gas",
            55.0,
            "Transport",
        ));
        transactions.push(entry(
            25,
            TransactionKind::Transfer,
            "To emergency fund",
            500.0,
            "",
        ));
    }

    transactions
}

fn month_day(month_start: NaiveDate, day: u32) -> NaiveDate {
    month_start.with_day(day).unwrap_or(month_start)
}
