//! Input record structures and scenario loading

mod data;
pub mod loader;
pub mod sample;

pub use data::{
    Account, AccountKind, Debt, DebtKind, FlowDirection, Frequency, LoanTerms, RecurringItem,
    Scenario, Transaction, TransactionKind,
};
pub(crate) use data::first_of_month;
pub use loader::{load_scenario, load_scenario_dir, load_scenario_from_reader};
pub use sample::sample_scenario;
