//! Repayment where the installment itself steps up by a fixed percentage
//! at the start of every new loan year.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{
    amortize_once, crossover_month, payoff_years, year_of_month, yearly_balance_floor, LoanTerms,
    SchedulePeriod,
};
use crate::annuity;
use crate::error::RepayError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RepayResult;

fn default_step_up() -> Rate {
    dec!(0.10)
}

fn default_headroom() -> u32 {
    1
}

/// Input for the annual step-up projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepUpInput {
    pub terms: LoanTerms,
    /// Annual installment increase as a fraction (0.10 = 10%).
    #[serde(default = "default_step_up")]
    pub step_up_fraction: Rate,
    /// Payment-count headroom beyond the nominal term, kept in line with
    /// the extra-installment scenario's extended count.
    #[serde(default = "default_headroom")]
    pub headroom_installments: u32,
}

/// Step-up projection output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepUpOutput {
    /// First-year installment, unrounded.
    pub initial_installment: Money,
    /// Installment in force when the schedule ended, rounded to 2dp.
    pub final_installment: Money,
    pub periods: Vec<SchedulePeriod>,
    /// Sum of the installments actually paid.
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

/// Project a schedule whose installment grows by `step_up_fraction` at each
/// year boundary.
///
/// The boundary month's interest/principal split still uses the outgoing
/// installment; the stepped value is recorded from that month on and drives
/// every later split.
pub fn project_step_up(input: &StepUpInput) -> RepayResult<ComputationOutput<StepUpOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.terms.validate()?;
    if input.step_up_fraction < Decimal::ZERO {
        return Err(RepayError::InvalidInput {
            field: "step_up_fraction".into(),
            reason: "Step-up fraction cannot be negative".into(),
        });
    }
    if input.step_up_fraction > Decimal::ONE {
        warnings.push(format!(
            "Step-up of {}% per year is unusually aggressive",
            input.step_up_fraction * dec!(100)
        ));
    }

    let monthly_rate = input.terms.monthly_rate();
    let initial_installment =
        annuity::monthly_installment(input.terms.principal, monthly_rate, input.terms.total_months())?;
    if monthly_rate.is_zero() {
        warnings.push("Zero interest rate; schedule uses straight-line amortisation".into());
    }
    if input.step_up_fraction.is_zero() {
        warnings.push("Step-up fraction is zero; schedule matches the baseline".into());
    }

    let nominal = input.terms.total_months() + input.headroom_installments;

    let mut periods: Vec<SchedulePeriod> = Vec::with_capacity(nominal as usize);
    let mut balance = input.terms.principal;
    let mut installment = initial_installment;
    let mut prev_year = 1u32;
    let mut installments_paid = Decimal::ZERO;

    for month in 1..=nominal {
        let step = amortize_once(balance, monthly_rate, installment);

        let year = year_of_month(month);
        if year != prev_year {
            installment = (installment * (Decimal::ONE + input.step_up_fraction)).round_dp(2);
        }
        prev_year = year;

        let period =
            SchedulePeriod::rounded(month, installment, step.principal, step.interest, step.balance);
        balance = period.balance;
        installments_paid += period.installment;
        periods.push(period);

        if balance < Decimal::ZERO {
            break;
        }
    }

    let total_payments = installments_paid;
    let total_interest = total_payments - input.terms.principal;

    let output = StepUpOutput {
        initial_installment,
        final_installment: installment,
        total_payments,
        total_interest,
        payoff_years: payoff_years(periods.len()),
        crossover_month: crossover_month(&periods),
        yearly_balance_floor: yearly_balance_floor(&periods),
        periods,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annual Step-Up Installment Schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_input() -> StepUpInput {
        StepUpInput {
            terms: LoanTerms {
                principal: dec!(5_000_000),
                annual_rate: dec!(8.6),
                term_years: 25,
            },
            step_up_fraction: dec!(0.10),
            headroom_installments: 1,
        }
    }

    fn run(input: &StepUpInput) -> StepUpOutput {
        project_step_up(input).unwrap().result
    }

    #[test]
    fn test_step_up_accelerates_payoff() {
        let out = run(&standard_input());
        assert!(
            out.periods.len() < 300,
            "A 10% annual step-up should finish well before 300 months, took {}",
            out.periods.len()
        );
    }

    #[test]
    fn test_year_two_installment_stepped() {
        let out = run(&standard_input());
        let expected = (out.initial_installment * dec!(1.10)).round_dp(2);
        // The boundary month (13) already records the stepped installment.
        assert_eq!(out.periods[12].installment, expected.round_dp(0));
        assert_eq!(out.periods[13].installment, expected.round_dp(0));
    }

    #[test]
    fn test_first_year_installment_unstepped() {
        let out = run(&standard_input());
        let base = out.initial_installment.round_dp(0);
        for p in &out.periods[..12] {
            assert_eq!(p.installment, base);
        }
    }

    #[test]
    fn test_boundary_split_uses_outgoing_installment() {
        let out = run(&standard_input());
        // Month 13's stored principal + interest reconstruct the year-one
        // installment, not the stepped one.
        let p = &out.periods[12];
        let implied = p.principal + p.interest;
        let base = out.initial_installment.round_dp(0);
        assert!(
            (implied - base).abs() <= dec!(1),
            "Month 13 split should add up to the outgoing installment {}, got {}",
            base,
            implied
        );
    }

    #[test]
    fn test_installments_compound_annually() {
        let out = run(&standard_input());
        // Year 3 installment carries two compounded 10% steps.
        let once = (out.initial_installment * dec!(1.10)).round_dp(2);
        let twice = (once * dec!(1.10)).round_dp(2);
        assert_eq!(out.periods[24].installment, twice.round_dp(0));
    }

    #[test]
    fn test_final_installment_reported() {
        let out = run(&standard_input());
        assert_eq!(
            out.periods.last().unwrap().installment,
            out.final_installment.round_dp(0)
        );
    }

    #[test]
    fn test_zero_step_up_runs_full_term() {
        let mut input = standard_input();
        input.step_up_fraction = Decimal::ZERO;
        let out = run(&input);
        // Without a step-up the loan amortises on the nominal clock.
        assert!(out.periods.len() >= 300);
        assert!(out.periods.len() <= 301);
    }

    #[test]
    fn test_schedule_never_exceeds_extended_count() {
        let out = run(&standard_input());
        assert!(out.periods.len() <= 301);
    }

    #[test]
    fn test_totals_tie_out() {
        let out = run(&standard_input());
        let installment_sum: Decimal = out.periods.iter().map(|p| p.installment).sum();
        assert_eq!(out.total_payments, installment_sum);
        assert_eq!(out.total_interest, out.total_payments - dec!(5_000_000));
    }

    #[test]
    fn test_larger_step_up_shorter_schedule() {
        let out_ten = run(&standard_input());
        let mut input = standard_input();
        input.step_up_fraction = dec!(0.20);
        let out_twenty = run(&input);
        assert!(out_twenty.periods.len() < out_ten.periods.len());
    }

    #[test]
    fn test_validation_negative_fraction() {
        let mut input = standard_input();
        input.step_up_fraction = dec!(-0.10);
        assert!(project_step_up(&input).is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let input: StepUpInput = serde_json::from_str(
            r#"{"terms": {"principal": "1000000", "annual_rate": "9", "term_years": 20}}"#,
        )
        .unwrap();
        assert_eq!(input.step_up_fraction, dec!(0.10));
        assert_eq!(input.headroom_installments, 1);
    }
}
