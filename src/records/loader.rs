//! Loaders for scenario inputs
//!
//! Two input shapes are supported: a single scenario JSON file bundling all
//! record kinds, or a directory of per-kind CSV files (`accounts.csv`,
//! `transactions.csv`, `debts.csv`, `recurring.csv`). Missing CSV files are
//! treated as empty record sets so partial scenarios load cleanly.

use crate::error::LoadError;
use crate::records::data::{Account, Debt, RecurringItem, Scenario, Transaction};
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load accounts from a CSV file.
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<Account>, LoadError> {
    load_csv(path)
}

/// Load accounts from any CSV reader.
pub fn load_accounts_from_reader<R: Read>(reader: R) -> Result<Vec<Account>, LoadError> {
    load_csv_from_reader(reader)
}

/// Load historical transactions from a CSV file.
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, LoadError> {
    load_csv(path)
}

/// Load historical transactions from any CSV reader.
pub fn load_transactions_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, LoadError> {
    load_csv_from_reader(reader)
}

/// Load debts from a CSV file.
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>, LoadError> {
    load_csv(path)
}

/// Load debts from any CSV reader.
pub fn load_debts_from_reader<R: Read>(reader: R) -> Result<Vec<Debt>, LoadError> {
    load_csv_from_reader(reader)
}

/// Load recurring items from a CSV file.
pub fn load_recurring<P: AsRef<Path>>(path: P) -> Result<Vec<RecurringItem>, LoadError> {
    load_csv(path)
}

/// Load recurring items from any CSV reader.
pub fn load_recurring_from_reader<R: Read>(reader: R) -> Result<Vec<RecurringItem>, LoadError> {
    load_csv_from_reader(reader)
}

/// Load a full scenario from a single JSON file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, LoadError> {
    let file = File::open(path)?;
    load_scenario_from_reader(BufReader::new(file))
}

/// Load a full scenario from any JSON reader.
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<Scenario, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a scenario from a directory of per-kind CSV files.
///
/// Absent files yield empty record sets; malformed rows in present files
/// are errors.
pub fn load_scenario_dir<P: AsRef<Path>>(dir: P) -> Result<Scenario, LoadError> {
    let dir = dir.as_ref();
    let scenario = Scenario {
        accounts: load_csv_if_present(&dir.join("accounts.csv"))?,
        transactions: load_csv_if_present(&dir.join("transactions.csv"))?,
        debts: load_csv_if_present(&dir.join("debts.csv"))?,
        recurring: load_csv_if_present(&dir.join("recurring.csv"))?,
    };
    debug!(
        "loaded scenario from {}: {} accounts, {} transactions, {} debts, {} recurring",
        dir.display(),
        scenario.accounts.len(),
        scenario.transactions.len(),
        scenario.debts.len(),
        scenario.recurring.len(),
    );
    Ok(scenario)
}

fn load_csv<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>, LoadError> {
    let file = File::open(path)?;
    load_csv_from_reader(BufReader::new(file))
}

fn load_csv_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

fn load_csv_if_present<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    if path.exists() {
        load_csv(path)
    } else {
        debug!("{} not present, using empty set", path.display());
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::data::{AccountKind, DebtKind, FlowDirection, Frequency, TransactionKind};
    use chrono::NaiveDate;

    #[test]
    fn test_load_accounts_csv() {
        let csv = "\
name,kind,balance
Everyday Checking,checking,2500.00
Emergency Fund,savings,12000.00
Visa,credit,-430.25
";
        let accounts = load_accounts_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[0].kind, AccountKind::Checking);
        assert_eq!(accounts[2].balance, -430.25);
    }

    #[test]
    fn test_load_debts_csv_with_optional_fields() {
        let csv = "\
name,kind,original_balance,current_balance,interest_rate,minimum_payment,remaining_months,start_date
Car Loan,auto,28000,19500.50,6.9,450,,2023-04-01
Visa,credit_card,,1850,22.99,55,,
";
        let debts = load_debts_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(debts.len(), 2);
        assert_eq!(debts[0].kind, DebtKind::Auto);
        assert_eq!(debts[0].original_balance, Some(28000.0));
        assert_eq!(
            debts[0].start_date,
            Some(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap())
        );
        assert_eq!(debts[1].original_balance, None);
        assert_eq!(debts[1].remaining_months, None);
        assert_eq!(debts[1].start_date, None);
    }

    #[test]
    fn test_load_transactions_csv() {
        let csv = "\
kind,description,amount,category,date
income,Paycheck,3200.00,Salary,2025-05-30
expense,Groceries,142.87,Food,2025-06-02
transfer,To savings,500.00,,2025-06-03
";
        let txns = load_transactions_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].kind, TransactionKind::Income);
        assert_eq!(txns[2].kind, TransactionKind::Transfer);
        assert_eq!(txns[2].category, "");
    }

    #[test]
    fn test_load_recurring_csv() {
        let csv = "\
name,direction,amount,category,frequency,start_date
Salary,income,3200,Salary,biweekly,2024-01-05
Rent,expense,1400,Housing,monthly,2024-01-01
Coffee,expense,4.50,Food,daily,2024-01-01
";
        let items = load_recurring_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].direction, FlowDirection::Income);
        assert_eq!(items[0].frequency, Frequency::Biweekly);
        assert_eq!(items[2].frequency, Frequency::Daily);
    }

    #[test]
    fn test_load_scenario_json() {
        let json = r#"{
            "accounts": [
                {"name": "Checking", "kind": "checking", "balance": 1000.0}
            ],
            "debts": [
                {"name": "Visa", "kind": "credit_card", "current_balance": 500.0,
                 "interest_rate": 19.99, "minimum_payment": 25.0}
            ]
        }"#;
        let scenario = load_scenario_from_reader(json.as_bytes()).unwrap();
        assert_eq!(scenario.accounts.len(), 1);
        assert_eq!(scenario.debts.len(), 1);
        assert!(scenario.transactions.is_empty());
        assert!(scenario.recurring.is_empty());
        assert_eq!(scenario.debts[0].kind, DebtKind::CreditCard);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let csv = "\
name,kind,balance
Checking,checking,not-a-number
";
        assert!(load_accounts_from_reader(csv.as_bytes()).is_err());
    }
}
