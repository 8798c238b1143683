//! Repayment with a lump prepayment (one or more installments) at each
//! year end.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{
    amortize_once, crossover_month, payoff_years, year_of_month, yearly_balance_floor, LoanTerms,
    SchedulePeriod,
};
use crate::annuity;
use crate::error::RepayError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::RepayResult;

/// Input for the extra-installment projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentInput {
    pub terms: LoanTerms,
    /// How many extra installments are paid at each year end.
    pub installments_per_year: u32,
    /// Size of one extra installment. Defaults to the base monthly
    /// installment rounded to a whole unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_amount: Option<Money>,
}

/// Extra-installment projection output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentOutput {
    /// The fixed installment, unrounded.
    pub monthly_installment: Money,
    /// Lump subtracted from the balance at each year boundary.
    pub annual_lump: Money,
    pub periods: Vec<SchedulePeriod>,
    /// Sum of the installments actually paid plus the annual lump.
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

/// Project a schedule where a lump prepayment lands in the first month of
/// every new loan year.
pub fn project_extra_payment(
    input: &ExtraPaymentInput,
) -> RepayResult<ComputationOutput<ExtraPaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.terms.validate()?;
    if input.installments_per_year == 0 {
        return Err(RepayError::InvalidInput {
            field: "installments_per_year".into(),
            reason: "Extra installment count must be at least 1".into(),
        });
    }
    if let Some(extra) = input.extra_amount {
        if extra < Decimal::ZERO {
            return Err(RepayError::InvalidInput {
                field: "extra_amount".into(),
                reason: "Extra amount cannot be negative".into(),
            });
        }
    }

    let monthly_rate = input.terms.monthly_rate();
    let installment =
        annuity::monthly_installment(input.terms.principal, monthly_rate, input.terms.total_months())?;
    if monthly_rate.is_zero() {
        warnings.push("Zero interest rate; schedule uses straight-line amortisation".into());
    }

    let per_installment = input.extra_amount.unwrap_or_else(|| installment.round_dp(0));
    let lump = per_installment * Decimal::from(input.installments_per_year);
    if lump.is_zero() {
        warnings.push("Extra amount is zero; schedule matches the baseline".into());
    }

    // Headroom beyond the nominal term so an overshooting final year still
    // lands inside the loop bound.
    let nominal = input.terms.total_months() + input.installments_per_year;

    let mut periods: Vec<SchedulePeriod> = Vec::with_capacity(nominal as usize);
    let mut balance = input.terms.principal;
    let mut prev_year = 1u32;
    let mut installments_paid = Decimal::ZERO;

    for month in 1..=nominal {
        let step = amortize_once(balance, monthly_rate, installment);
        let mut end_balance = step.balance;

        let year = year_of_month(month);
        if year != prev_year {
            end_balance -= lump;
        }
        prev_year = year;

        let period =
            SchedulePeriod::rounded(month, installment, step.principal, step.interest, end_balance);
        balance = period.balance;
        installments_paid += period.installment;
        periods.push(period);

        if balance < Decimal::ZERO {
            break;
        }
    }

    let total_payments = installments_paid + lump;
    let total_interest = total_payments - input.terms.principal;

    let output = ExtraPaymentOutput {
        monthly_installment: installment,
        annual_lump: lump,
        total_payments,
        total_interest,
        payoff_years: payoff_years(periods.len()),
        crossover_month: crossover_month(&periods),
        yearly_balance_floor: yearly_balance_floor(&periods),
        periods,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Year-End Extra Installment Schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}
