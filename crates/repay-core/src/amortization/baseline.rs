//! Plain level-pay amortisation over the full nominal term.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{
    amortize_once, crossover_month, payoff_years, yearly_balance_floor, LoanTerms, SchedulePeriod,
};
use crate::annuity;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::RepayResult;

/// Input for the baseline projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineInput {
    pub terms: LoanTerms,
}

/// Baseline projection output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineOutput {
    /// The fixed installment, unrounded.
    pub monthly_installment: Money,
    pub periods: Vec<SchedulePeriod>,
    /// Installment times the nominal payment count.
    pub total_payments: Money,
    /// Total payments less the amount borrowed.
    pub total_interest: Money,
    /// Schedule length in years.
    pub payoff_years: Decimal,
    /// First month where principal repaid meets or exceeds interest.
    pub crossover_month: Option<u32>,
    /// Minimum balance per loan year, for charting.
    pub yearly_balance_floor: Vec<Money>,
}

/// Project the repayment schedule for a fixed installment over a fixed term.
pub fn project_baseline(
    input: &BaselineInput,
) -> RepayResult<ComputationOutput<BaselineOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.terms.validate()?;
    let monthly_rate = input.terms.monthly_rate();
    let nominal = input.terms.total_months();

    let installment = annuity::monthly_installment(input.terms.principal, monthly_rate, nominal)?;
    if monthly_rate.is_zero() {
        warnings.push("Zero interest rate; schedule uses straight-line amortisation".into());
    }

    let mut periods = Vec::with_capacity(nominal as usize);
    let mut balance = input.terms.principal;

    for month in 1..=nominal {
        let step = amortize_once(balance, monthly_rate, installment);
        let period =
            SchedulePeriod::rounded(month, installment, step.principal, step.interest, step.balance);
        balance = period.balance;
        periods.push(period);
        if balance < Decimal::ZERO {
            break;
        }
    }

    let total_payments = installment * Decimal::from(nominal);
    let total_interest = total_payments - input.terms.principal;

    let output = BaselineOutput {
        monthly_installment: installment,
        total_payments,
        total_interest,
        payoff_years: payoff_years(periods.len()),
        crossover_month: crossover_month(&periods),
        yearly_balance_floor: yearly_balance_floor(&periods),
        periods,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Pay Amortisation Schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}
