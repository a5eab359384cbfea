//! Run financial projections over a scenario from the command line
//!
//! Loads a scenario (JSON bundle, directory of CSV files, or the built-in
//! sample) and prints the requested projection as a table, with optional
//! CSV or JSON output for further processing.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use finance_projection::projection::{
    analyze_spending_trends, compare_strategies, credit_card_payoff, forecast_cash_flow,
    generate_schedule, project_balance, savings_goal, simulate_extra_payments, simulate_payoff,
    DebtPlanOutcome, PayoffMethod, ScheduledPayment, MAX_PAYOFF_MONTHS,
};
use finance_projection::records::{self, LoanTerms, Scenario};
use log::info;
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "plan",
    about = "Personal finance projections: amortization, debt payoff, forecasts, trends"
)]
struct Cli {
    /// Scenario JSON file bundling accounts, transactions, debts, recurring
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,

    /// Directory of scenario CSV files (accounts.csv, debts.csv, ...)
    #[arg(long, global = true, conflicts_with = "scenario")]
    scenario_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a fixed-rate amortization schedule
    Schedule {
        #[arg(long)]
        principal: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        /// Term in months
        #[arg(long)]
        term: u32,
        /// Extra payment per month on top of the fixed payment
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
        /// Schedule anchor; the first payment lands one month later [default: today]
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Write the schedule rows to a CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Simulate a revolving payoff at a fixed monthly payment
    Card {
        #[arg(long)]
        balance: f64,
        /// APR in percent
        #[arg(long)]
        apr: f64,
        #[arg(long)]
        payment: f64,
    },
    /// Simulate paying off the scenario's debts
    Debts {
        /// Extra payment per month beyond the minimums
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
        #[arg(long, value_enum, default_value_t = MethodArg::Avalanche)]
        method: MethodArg,
        /// Compare avalanche and snowball side by side
        #[arg(long)]
        compare: bool,
    },
    /// Forecast cash flow from the scenario's recurring items
    Forecast {
        #[arg(long, default_value_t = 12)]
        months: u32,
        /// Anchor month [default: today]
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Also project the balance at this date
        #[arg(long)]
        target: Option<NaiveDate>,
        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Analyze spending trends over the scenario's transactions
    Trends {
        #[arg(long, default_value_t = 6)]
        months: u32,
        /// Window end [default: today]
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Print the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Project how long reaching a savings target takes
    Savings {
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        /// Contribution per month
        #[arg(long)]
        contribution: f64,
        /// Annual return in percent
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Avalanche,
    Snowball,
}

impl From<MethodArg> for PayoffMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Avalanche => PayoffMethod::Avalanche,
            MethodArg::Snowball => PayoffMethod::Snowball,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command {
        Command::Schedule {
            principal,
            rate,
            term,
            extra,
            start,
            output,
        } => run_schedule(principal, rate, term, extra, start.unwrap_or(today), output.as_deref()),
        Command::Card {
            balance,
            apr,
            payment,
        } => run_card(balance, apr, payment),
        Command::Debts {
            extra,
            method,
            compare,
        } => {
            let scenario = load_scenario_input(&cli, today)?;
            run_debts(&scenario, extra, method.into(), compare)
        }
        Command::Forecast {
            months,
            from,
            target,
            json,
        } => {
            let scenario = load_scenario_input(&cli, today)?;
            run_forecast(&scenario, months, from.unwrap_or(today), target, json)
        }
        Command::Trends {
            months,
            as_of,
            json,
        } => {
            let scenario = load_scenario_input(&cli, today)?;
            run_trends(&scenario, months, as_of.unwrap_or(today), json)
        }
        Command::Savings {
            target,
            current,
            contribution,
            rate,
        } => run_savings(target, current, contribution, rate),
    }
}

fn load_scenario_input(cli: &Cli, today: NaiveDate) -> Result<Scenario> {
    if let Some(path) = &cli.scenario {
        records::load_scenario(path)
            .with_context(|| format!("loading scenario {}", path.display()))
    } else if let Some(dir) = &cli.scenario_dir {
        records::load_scenario_dir(dir)
            .with_context(|| format!("loading scenario directory {}", dir.display()))
    } else {
        info!("no scenario given, using the built-in sample");
        Ok(records::sample_scenario(today))
    }
}

fn run_schedule(
    principal: f64,
    rate: f64,
    term: u32,
    extra: f64,
    start: NaiveDate,
    output: Option<&Path>,
) -> Result<()> {
    let terms = LoanTerms::new(principal, rate, term);

    if extra != 0.0 {
        let baseline = generate_schedule(&terms, start)?;
        let outcome = simulate_extra_payments(&terms, extra, start)?;
        println!(
            "{:.2}/month + {:.2} extra on {:.2} at {}% over {} months",
            baseline.monthly_payment, extra, principal, rate, term
        );
        print_schedule(&outcome.schedule);
        println!(
            "\nPaid off in {} of {} months, interest {:.2} vs {:.2} baseline ({:.2} saved)",
            outcome.months_to_payoff,
            outcome.original_months,
            outcome.total_interest,
            baseline.total_interest,
            outcome.interest_saved
        );
        if let Some(path) = output {
            write_schedule_csv(path, &outcome.schedule)?;
        }
    } else {
        let result = generate_schedule(&terms, start)?;
        println!(
            "{:.2}/month on {:.2} at {}% over {} months",
            result.monthly_payment, principal, rate, term
        );
        print_schedule(&result.schedule);
        println!(
            "\nTotal paid {:.2}, interest {:.2}",
            result.total_payments, result.total_interest
        );
        if let Some(path) = output {
            write_schedule_csv(path, &result.schedule)?;
        }
    }
    Ok(())
}

fn print_schedule(rows: &[ScheduledPayment]) {
    println!(
        "{:>5}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}",
        "Month", "Date", "Payment", "Principal", "Interest", "Balance"
    );
    for row in rows {
        println!(
            "{:>5}  {:>10}  {:>10.2}  {:>10.2}  {:>10.2}  {:>12.2}",
            row.month, row.date, row.payment, row.principal, row.interest, row.balance
        );
    }
}

fn write_schedule_csv(path: &Path, rows: &[ScheduledPayment]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating output file {}", path.display()))?;

    writeln!(
        file,
        "Month,Date,Payment,Principal,Interest,Balance,TotalInterest,TotalPrincipal"
    )?;
    for row in rows {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            row.month,
            row.date,
            row.payment,
            row.principal,
            row.interest,
            row.balance,
            row.total_interest,
            row.total_principal,
        )?;
    }

    println!("Schedule written to {}", path.display());
    Ok(())
}

fn run_card(balance: f64, apr: f64, payment: f64) -> Result<()> {
    let payoff = credit_card_payoff(balance, apr, payment)?;
    if payoff.months_to_payoff == MAX_PAYOFF_MONTHS {
        println!(
            "Not paid off within {} months; {:.2} interest accrued so far",
            MAX_PAYOFF_MONTHS, payoff.total_interest
        );
        return Ok(());
    }
    println!(
        "Paid off in {} months: {:.2} interest, {:.2} total paid",
        payoff.months_to_payoff, payoff.total_interest, payoff.total_payments
    );
    Ok(())
}

fn run_debts(scenario: &Scenario, extra: f64, method: PayoffMethod, compare: bool) -> Result<()> {
    if scenario.debts.is_empty() {
        bail!("scenario has no debts");
    }

    let sim_start = Instant::now();

    // Standalone minimum-payment payoff per debt, computed in parallel.
    let solo: Vec<(String, Option<u32>)> = scenario
        .debts
        .par_iter()
        .map(|debt| {
            let months = credit_card_payoff(
                debt.current_balance,
                debt.interest_rate,
                debt.minimum_payment,
            )
            .ok()
            .map(|payoff| payoff.months_to_payoff);
            (debt.name.clone(), months)
        })
        .collect();

    println!(
        "{:<24}  {:>12}  {:>7}  {:>9}  {:>12}",
        "Debt", "Balance", "Rate", "Minimum", "Solo payoff"
    );
    for (debt, (_, solo_months)) in scenario.debts.iter().zip(&solo) {
        let solo_text = match solo_months {
            Some(m) if *m < MAX_PAYOFF_MONTHS => format!("{m} mo"),
            _ => "never".to_string(),
        };
        println!(
            "{:<24}  {:>12.2}  {:>6.2}%  {:>9.2}  {:>12}",
            debt.name, debt.current_balance, debt.interest_rate, debt.minimum_payment, solo_text
        );
    }

    let outcome = simulate_payoff(&scenario.debts, extra, method);
    info!(
        "simulated {} debts in {:?}",
        scenario.debts.len(),
        sim_start.elapsed()
    );

    println!("\n{:?} plan with {:.2} extra/month:", method, extra);
    print_plan_summary(&outcome);

    if compare {
        if let Some(comparison) = compare_strategies(&scenario.debts, extra) {
            println!("\n{:<22}  {:>7}  {:>14}", "Strategy", "Months", "Interest");
            for (label, run) in [
                ("avalanche (min only)", &comparison.avalanche),
                ("snowball (min only)", &comparison.snowball),
                ("avalanche + extra", &comparison.avalanche_extra),
                ("snowball + extra", &comparison.snowball_extra),
            ] {
                println!(
                    "{:<22}  {:>7}  {:>14.2}",
                    label, run.total_months, run.total_interest_paid
                );
            }
            println!("Recommended: {:?}", comparison.recommended);
        }
    }

    Ok(())
}

fn print_plan_summary(outcome: &DebtPlanOutcome) {
    for payoff in &outcome.payoff_order {
        match payoff.payoff_month {
            Some(month) => println!("  {:<24} paid off month {}", payoff.name, month),
            None => println!(
                "  {:<24} still owed after {} months",
                payoff.name, outcome.total_months
            ),
        }
    }
    println!(
        "  {} months total, {:.2} interest paid",
        outcome.total_months, outcome.total_interest_paid
    );
    if !outcome.converged() {
        println!("  (did not converge within {} months)", MAX_PAYOFF_MONTHS);
    }
}

fn run_forecast(
    scenario: &Scenario,
    months: u32,
    from: NaiveDate,
    target: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let forecast = forecast_cash_flow(&scenario.accounts, &scenario.recurring, months, from);

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        println!(
            "{:<10}  {:>12}  {:>12}  {:>12}  {:>14}",
            "Month", "Income", "Expenses", "Net", "Balance"
        );
        for row in &forecast {
            println!(
                "{:<10}  {:>12.2}  {:>12.2}  {:>12.2}  {:>14.2}",
                row.month_name, row.income, row.expenses, row.net_change, row.projected_balance
            );
        }
    }

    if let Some(target) = target {
        let projection =
            project_balance(&scenario.accounts, &scenario.recurring, target, from);
        let note = if projection.extrapolated {
            " (extrapolated)"
        } else {
            ""
        };
        println!(
            "\nProjected balance for {}: {:.2}{}",
            projection.month, projection.projected_balance, note
        );
    }

    Ok(())
}

fn run_trends(scenario: &Scenario, months: u32, as_of: NaiveDate, json: bool) -> Result<()> {
    let trends = analyze_spending_trends(&scenario.transactions, months, as_of);

    if json {
        println!("{}", serde_json::to_string_pretty(&trends)?);
        return Ok(());
    }

    println!("Spending by category:");
    for (category, total) in &trends.category_totals {
        println!("  {:<20} {:>12.2}", category, total);
    }
    println!(
        "\nAverages over {} active months: {:.2} in, {:.2} out, {:.2} saved",
        trends.monthly_totals.len(),
        trends.avg_monthly_income,
        trends.avg_monthly_expense,
        trends.avg_monthly_savings
    );
    println!(
        "Expense trend: {:?} ({:+.1}%/month)",
        trends.expense_trend, trends.trend_percentage
    );

    Ok(())
}

fn run_savings(target: f64, current: f64, contribution: f64, rate: f64) -> Result<()> {
    let outcome = savings_goal(target, current, contribution, rate)?;

    if outcome.months_to_goal == MAX_PAYOFF_MONTHS && outcome.final_balance < target {
        println!(
            "Goal not reached within {} months; balance stalls at {:.2}",
            MAX_PAYOFF_MONTHS, outcome.final_balance
        );
        return Ok(());
    }

    println!(
        "Goal of {:.2} reached in {} months ({:.1} years)",
        target, outcome.months_to_goal, outcome.years_to_goal
    );
    println!(
        "Contributed {:.2}, earned {:.2}, final balance {:.2}",
        outcome.total_contributed, outcome.total_interest, outcome.final_balance
    );
    if !outcome.milestones.is_empty() {
        println!("\n{:>5}  {:>14}  {:>14}  {:>12}", "Month", "Balance", "Contributed", "Interest");
        for milestone in &outcome.milestones {
            println!(
                "{:>5}  {:>14.2}  {:>14.2}  {:>12.2}",
                milestone.month, milestone.balance, milestone.contributed, milestone.interest
            );
        }
    }

    Ok(())
}
