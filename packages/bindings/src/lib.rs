use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use emi_core::amortization::{self, AmortizationEntry};
use emi_core::calculator::{self, EmiInput};
use emi_core::limits::LoanLimits;
use emi_core::LoanInputs;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Loan inputs plus optional limit overrides, as sent by the calculator UI.
#[derive(Deserialize)]
struct LoanRequest {
    #[serde(flatten)]
    loan: LoanInputs,
    #[serde(default)]
    limits: LoanLimits,
}

#[derive(Deserialize)]
struct YearlyRequest {
    schedule: Vec<AmortizationEntry>,
    years: u32,
    #[serde(default)]
    start_year: Option<i32>,
    #[serde(default)]
    limits: LoanLimits,
}

#[derive(Deserialize)]
struct BreakdownRequest {
    principal: f64,
    total_interest: f64,
}

// ---------------------------------------------------------------------------
// Numeric API
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_payment(input_json: String) -> NapiResult<f64> {
    let req: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(amortization::compute_payment_with(&req.loan, &req.limits))
}

#[napi]
pub fn loan_totals(input_json: String) -> NapiResult<String> {
    let req: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let totals = amortization::loan_totals(&req.loan, &req.limits);
    serde_json::to_string(&totals).map_err(to_napi_error)
}

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let req: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = amortization::generate_schedule_with(&req.loan, &req.limits);
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[napi]
pub fn aggregate_by_year(input_json: String) -> NapiResult<String> {
    let req: YearlyRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let yearly = amortization::aggregate_by_year_with(&req.schedule, req.years, req.start_year, &req.limits);
    serde_json::to_string(&yearly).map_err(to_napi_error)
}

#[napi]
pub fn compute_breakdown(input_json: String) -> NapiResult<String> {
    let req: BreakdownRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let slices = amortization::compute_breakdown(req.principal, req.total_interest);
    serde_json::to_string(&slices).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// One-shot summary
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: EmiInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
