//! Side-by-side comparison of the three repayment strategies on one loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::baseline::{project_baseline, BaselineInput};
use crate::amortization::extra_payment::{project_extra_payment, ExtraPaymentInput};
use crate::amortization::schedule::LoanTerms;
use crate::amortization::step_up::{project_step_up, StepUpInput};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RepayResult;

fn default_installments_per_year() -> u32 {
    1
}

fn default_step_up() -> Rate {
    dec!(0.10)
}

/// Input for the strategy comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub terms: LoanTerms,
    /// Extra installments paid at each year end in the extra-EMI scenario.
    #[serde(default = "default_installments_per_year")]
    pub installments_per_year: u32,
    /// Override for the size of one extra installment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_amount: Option<Money>,
    /// Annual installment increase in the step-up scenario.
    #[serde(default = "default_step_up")]
    pub step_up_fraction: Rate,
}

/// Headline numbers for one strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: String,
    /// Installment in force in the first year, unrounded.
    pub monthly_installment: Money,
    pub total_payments: Money,
    pub total_interest: Money,
    pub payoff_years: Decimal,
    /// Interest saved relative to the baseline (zero for the baseline).
    pub interest_saved: Money,
    /// Years shaved off the nominal term (zero for the baseline).
    pub years_saved: Decimal,
}

/// Comparison output: one summary per strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub baseline: StrategySummary,
    pub extra_payment: StrategySummary,
    pub step_up: StrategySummary,
}

/// Run all three schedulers on the same loan and summarise them against the
/// baseline.
pub fn compare_strategies(
    input: &ComparisonInput,
) -> RepayResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let base = project_baseline(&BaselineInput {
        terms: input.terms.clone(),
    })?;
    let extra = project_extra_payment(&ExtraPaymentInput {
        terms: input.terms.clone(),
        installments_per_year: input.installments_per_year,
        extra_amount: input.extra_amount,
    })?;
    let step = project_step_up(&StepUpInput {
        terms: input.terms.clone(),
        step_up_fraction: input.step_up_fraction,
        headroom_installments: input.installments_per_year,
    })?;

    for envelope_warnings in [&base.warnings, &extra.warnings, &step.warnings] {
        for w in envelope_warnings.iter() {
            if !warnings.contains(w) {
                warnings.push(w.clone());
            }
        }
    }

    let baseline = StrategySummary {
        strategy: "baseline".into(),
        monthly_installment: base.result.monthly_installment,
        total_payments: base.result.total_payments,
        total_interest: base.result.total_interest,
        payoff_years: base.result.payoff_years,
        interest_saved: Decimal::ZERO,
        years_saved: Decimal::ZERO,
    };
    let extra_payment = StrategySummary {
        strategy: "extra_installment".into(),
        monthly_installment: extra.result.monthly_installment,
        total_payments: extra.result.total_payments,
        total_interest: extra.result.total_interest,
        payoff_years: extra.result.payoff_years,
        interest_saved: baseline.total_interest - extra.result.total_interest,
        years_saved: baseline.payoff_years - extra.result.payoff_years,
    };
    let step_up = StrategySummary {
        strategy: "step_up".into(),
        monthly_installment: step.result.initial_installment,
        total_payments: step.result.total_payments,
        total_interest: step.result.total_interest,
        payoff_years: step.result.payoff_years,
        interest_saved: baseline.total_interest - step.result.total_interest,
        years_saved: baseline.payoff_years - step.result.payoff_years,
    };

    let output = ComparisonOutput {
        baseline,
        extra_payment,
        step_up,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Repayment Strategy Comparison",
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

    fn standard_input() -> ComparisonInput {
        ComparisonInput {
            terms: LoanTerms {
                principal: dec!(5_000_000),
                annual_rate: dec!(8.6),
                term_years: 25,
            },
            installments_per_year: 1,
            extra_amount: None,
            step_up_fraction: dec!(0.10),
        }
    }

    #[test]
    fn test_accelerated_strategies_save_interest() {
        let out = compare_strategies(&standard_input()).unwrap().result;
        assert!(out.extra_payment.interest_saved > Decimal::ZERO);
        assert!(out.step_up.interest_saved > Decimal::ZERO);
        assert_eq!(out.baseline.interest_saved, Decimal::ZERO);
    }

    #[test]
    fn test_accelerated_strategies_save_years() {
        let out = compare_strategies(&standard_input()).unwrap().result;
        assert!(out.extra_payment.years_saved > Decimal::ZERO);
        assert!(out.step_up.years_saved > Decimal::ZERO);
        assert_eq!(out.baseline.payoff_years, dec!(25));
    }

    #[test]
    fn test_strategy_labels() {
        let out = compare_strategies(&standard_input()).unwrap().result;
        assert_eq!(out.baseline.strategy, "baseline");
        assert_eq!(out.extra_payment.strategy, "extra_installment");
        assert_eq!(out.step_up.strategy, "step_up");
    }

    #[test]
    fn test_same_installment_across_strategies() {
        let out = compare_strategies(&standard_input()).unwrap().result;
        assert_eq!(
            out.baseline.monthly_installment,
            out.extra_payment.monthly_installment
        );
        assert_eq!(
            out.baseline.monthly_installment,
            out.step_up.monthly_installment
        );
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut input = standard_input();
        input.terms.term_years = 0;
        assert!(compare_strategies(&input).is_err());
    }
}
