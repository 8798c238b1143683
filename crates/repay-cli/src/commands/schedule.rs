use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use repay_core::amortization::baseline::{self, BaselineInput};
use repay_core::amortization::comparison::{self, ComparisonInput};
use repay_core::amortization::extra_payment::{self, ExtraPaymentInput};
use repay_core::amortization::schedule::LoanTerms;
use repay_core::amortization::step_up::{self, StepUpInput};

use crate::input;

/// Loan flags shared by every subcommand.
#[derive(Args)]
pub struct LoanArgs {
    /// Loan principal. Overrides --home-value/--down-payment.
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Purchase value of the property
    #[arg(long)]
    pub home_value: Option<Decimal>,

    /// Down payment deducted from the purchase value
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate in percent (e.g. 8.6)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,
}

impl LoanArgs {
    fn into_terms(self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = match (self.principal, self.home_value) {
            (Some(p), _) => p,
            (None, Some(hv)) => hv - self.down_payment,
            (None, None) => {
                return Err("--principal or --home-value is required (or provide --input)".into())
            }
        };
        Ok(LoanTerms {
            principal,
            annual_rate: self.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: self.years.ok_or("--years is required (or provide --input)")?,
        })
    }
}

/// Arguments for the baseline schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the extra-EMI schedule
#[derive(Args)]
pub struct ExtraEmiArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Extra EMIs paid at each year end
    #[arg(long, default_value = "1")]
    pub per_year: u32,

    /// Size of one extra EMI (defaults to the monthly EMI)
    #[arg(long)]
    pub extra_amount: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the step-up schedule
#[derive(Args)]
pub struct StepUpArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Annual EMI increase as a fraction (0.10 = 10%)
    #[arg(long, default_value = "0.10")]
    pub step_up: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the strategy comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Extra EMIs paid at each year end
    #[arg(long, default_value = "1")]
    pub per_year: u32,

    /// Size of one extra EMI (defaults to the monthly EMI)
    #[arg(long)]
    pub extra_amount: Option<Decimal>,

    /// Annual EMI increase as a fraction (0.10 = 10%)
    #[arg(long, default_value = "0.10")]
    pub step_up: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let baseline_input: BaselineInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BaselineInput {
            terms: args.loan.into_terms()?,
        }
    };
    let result = baseline::project_baseline(&baseline_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_extra_emi(args: ExtraEmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let extra_input: ExtraPaymentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ExtraPaymentInput {
            terms: args.loan.into_terms()?,
            installments_per_year: args.per_year,
            extra_amount: args.extra_amount,
        }
    };
    let result = extra_payment::project_extra_payment(&extra_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_step_up(args: StepUpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let step_input: StepUpInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        StepUpInput {
            terms: args.loan.into_terms()?,
            step_up_fraction: args.step_up,
            headroom_installments: 1,
        }
    };
    let result = step_up::project_step_up(&step_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let compare_input: ComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ComparisonInput {
            terms: args.loan.into_terms()?,
            installments_per_year: args.per_year,
            extra_amount: args.extra_amount,
            step_up_fraction: args.step_up,
        }
    };
    let result = comparison::compare_strategies(&compare_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_principal_from_home_value_and_down_payment() {
        let loan = LoanArgs {
            principal: None,
            home_value: Some(dec!(5_500_000)),
            down_payment: dec!(500_000),
            rate: Some(dec!(8.6)),
            years: Some(25),
        };
        let terms = loan.into_terms().unwrap();
        assert_eq!(terms.principal, dec!(5_000_000));
    }

    #[test]
    fn test_explicit_principal_wins() {
        let loan = LoanArgs {
            principal: Some(dec!(1_000_000)),
            home_value: Some(dec!(5_500_000)),
            down_payment: dec!(500_000),
            rate: Some(dec!(8.6)),
            years: Some(25),
        };
        let terms = loan.into_terms().unwrap();
        assert_eq!(terms.principal, dec!(1_000_000));
    }

    #[test]
    fn test_missing_rate_is_an_error() {
        let loan = LoanArgs {
            principal: Some(dec!(1_000_000)),
            home_value: None,
            down_payment: Decimal::ZERO,
            rate: None,
            years: Some(25),
        };
        assert!(loan.into_terms().is_err());
    }
}
