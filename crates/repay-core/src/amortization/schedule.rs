//! Shared schedule machinery: loan terms, the per-month amortisation step,
//! and the derived chart series every strategy reports.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RepayError;
use crate::types::{Money, Rate};
use crate::RepayResult;

/// Loan-level inputs shared by every repayment strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed (purchase value minus down payment).
    pub principal: Money,
    /// Annual interest rate in percentage points (8.6 = 8.6%).
    pub annual_rate: Rate,
    /// Loan term in whole years.
    pub term_years: u32,
}

impl LoanTerms {
    /// Periodic rate applied each month.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate / dec!(100) / dec!(12)
    }

    /// Nominal number of monthly payments over the full term.
    pub fn total_months(&self) -> u32 {
        self.term_years * 12
    }

    pub(crate) fn validate(&self) -> RepayResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(RepayError::InvalidInput {
                field: "principal".into(),
                reason: "Principal cannot be negative".into(),
            });
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(RepayError::InvalidInput {
                field: "annual_rate".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }
        if self.term_years == 0 {
            return Err(RepayError::InvalidInput {
                field: "term_years".into(),
                reason: "Term must be at least 1 year".into(),
            });
        }
        Ok(())
    }
}

/// One month of a repayment schedule.
///
/// Money fields are stored rounded to the nearest whole currency unit, and
/// the rounded balance is what the next month's interest accrues on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePeriod {
    /// 1-based month number.
    pub month: u32,
    pub installment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Remaining balance after this month's payment (and any year-end lump).
    pub balance: Money,
    /// 1-based loan year this month falls in.
    pub year: u32,
}

impl SchedulePeriod {
    pub(crate) fn rounded(
        month: u32,
        installment: Money,
        principal: Money,
        interest: Money,
        balance: Money,
    ) -> Self {
        SchedulePeriod {
            month,
            installment: installment.round_dp(0),
            principal: principal.round_dp(0),
            interest: interest.round_dp(0),
            balance: balance.round_dp(0),
            year: year_of_month(month),
        }
    }
}

/// Loan year a given 1-based month falls in: months 1-12 are year 1.
pub fn year_of_month(month: u32) -> u32 {
    month.div_ceil(12)
}

/// Unrounded outcome of splitting one installment against the running balance.
pub(crate) struct AmortizationStep {
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

/// One amortisation step: interest accrues on the opening balance, the rest
/// of the installment retires principal.
pub(crate) fn amortize_once(
    balance: Money,
    monthly_rate: Rate,
    installment: Money,
) -> AmortizationStep {
    let interest = balance * monthly_rate;
    let principal = installment - interest;
    AmortizationStep {
        interest,
        principal,
        balance: balance - principal,
    }
}

/// First month whose principal component meets or exceeds the interest
/// component, as stored (rounded).
pub fn crossover_month(periods: &[SchedulePeriod]) -> Option<u32> {
    periods
        .iter()
        .find(|p| p.principal >= p.interest)
        .map(|p| p.month)
}

/// Minimum stored balance per loan year, index 0 = year 1.
pub fn yearly_balance_floor(periods: &[SchedulePeriod]) -> Vec<Money> {
    let mut floors: Vec<Money> = Vec::new();
    for p in periods {
        let idx = (p.year - 1) as usize;
        if idx == floors.len() {
            floors.push(p.balance);
        } else if p.balance < floors[idx] {
            floors[idx] = p.balance;
        }
    }
    floors
}

/// Years elapsed for a schedule of the given length.
pub(crate) fn payoff_years(period_count: usize) -> Decimal {
    Decimal::from(period_count as u64) / dec!(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_year_of_month_boundaries() {
        assert_eq!(year_of_month(1), 1);
        assert_eq!(year_of_month(12), 1);
        assert_eq!(year_of_month(13), 2);
        assert_eq!(year_of_month(24), 2);
        assert_eq!(year_of_month(25), 3);
        assert_eq!(year_of_month(300), 25);
    }

    #[test]
    fn test_amortize_once_split() {
        let step = amortize_once(dec!(1000), dec!(0.01), dec!(110));
        assert_eq!(step.interest, dec!(10));
        assert_eq!(step.principal, dec!(100));
        assert_eq!(step.balance, dec!(900));
    }

    #[test]
    fn test_period_rounding_is_half_even() {
        let p = SchedulePeriod::rounded(1, dec!(100.5), dec!(99.5), dec!(2.5), dec!(3.5));
        assert_eq!(p.installment, dec!(100));
        assert_eq!(p.principal, dec!(100));
        assert_eq!(p.interest, dec!(2));
        assert_eq!(p.balance, dec!(4));
    }

    #[test]
    fn test_crossover_month() {
        let periods = vec![
            SchedulePeriod::rounded(1, dec!(100), dec!(40), dec!(60), dec!(960)),
            SchedulePeriod::rounded(2, dec!(100), dec!(50), dec!(50), dec!(910)),
            SchedulePeriod::rounded(3, dec!(100), dec!(60), dec!(40), dec!(850)),
        ];
        assert_eq!(crossover_month(&periods), Some(2));
    }

    #[test]
    fn test_crossover_month_none_when_interest_dominates() {
        let periods = vec![SchedulePeriod::rounded(
            1,
            dec!(100),
            dec!(40),
            dec!(60),
            dec!(960),
        )];
        assert_eq!(crossover_month(&periods), None);
    }

    #[test]
    fn test_yearly_balance_floor_takes_minimum() {
        let mut periods = Vec::new();
        for month in 1..=24u32 {
            periods.push(SchedulePeriod::rounded(
                month,
                dec!(10),
                dec!(10),
                dec!(0),
                Decimal::from(1000 - 10 * month),
            ));
        }
        let floors = yearly_balance_floor(&periods);
        assert_eq!(floors.len(), 2);
        assert_eq!(floors[0], dec!(880));
        assert_eq!(floors[1], dec!(760));
    }
}
