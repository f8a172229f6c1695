use clap::Args;
use serde_json::Value;

use emi_core::amortization;
use emi_core::limits::nominal_years;

use super::loan::{effective_loan, report, resolve_input, LoanArgs};

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input = resolve_input(&args.loan)?;
    let schedule =
        amortization::generate_schedule_with(&effective_loan(&emi_input), &emi_input.limits);
    report(schedule, &emi_input)
}

#[derive(Args)]
pub struct YearlyArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Calendar year of the first payment (defaults to the current year)
    #[arg(long)]
    pub start_year: Option<i32>,
}

pub fn run_yearly(args: YearlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input = resolve_input(&args.loan)?;
    let loan = effective_loan(&emi_input);
    let schedule = amortization::generate_schedule_with(&loan, &emi_input.limits);
    let years = nominal_years(loan.term_years, &emi_input.limits);
    let start_year = args
        .start_year
        .or(emi_input.start_year)
        .unwrap_or_else(crate::current_year);
    let yearly = amortization::aggregate_by_year_with(
        &schedule,
        years,
        Some(start_year),
        &emi_input.limits,
    );
    report(yearly, &emi_input)
}
