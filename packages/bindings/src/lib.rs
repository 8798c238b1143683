use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn project_baseline(input_json: String) -> NapiResult<String> {
    let input: repay_core::amortization::baseline::BaselineInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = repay_core::amortization::baseline::project_baseline(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_extra_payment(input_json: String) -> NapiResult<String> {
    let input: repay_core::amortization::extra_payment::ExtraPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = repay_core::amortization::extra_payment::project_extra_payment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_step_up(input_json: String) -> NapiResult<String> {
    let input: repay_core::amortization::step_up::StepUpInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        repay_core::amortization::step_up::project_step_up(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_strategies(input_json: String) -> NapiResult<String> {
    let input: repay_core::amortization::comparison::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = repay_core::amortization::comparison::compare_strategies(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
