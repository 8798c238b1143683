use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::RepayError;
use crate::types::{Money, Rate};
use crate::RepayResult;

/// Fixed monthly installment for a level-pay loan.
///
/// Standard annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)`. A zero rate
/// degenerates the formula, so it falls back to straight-line `P / n`.
pub fn monthly_installment(
    principal: Money,
    monthly_rate: Rate,
    periods: u32,
) -> RepayResult<Money> {
    if periods == 0 {
        return Err(RepayError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if principal < Decimal::ZERO {
        return Err(RepayError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }
    if monthly_rate < Decimal::ZERO {
        return Err(RepayError::InvalidInput {
            field: "monthly_rate".into(),
            reason: "Monthly rate cannot be negative".into(),
        });
    }

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = (Decimal::ONE + monthly_rate).powu(periods as u64);
    let annuity_factor = factor - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Err(RepayError::DivisionByZero {
            context: "installment annuity factor".into(),
        });
    }

    Ok(principal * monthly_rate * factor / annuity_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_installment_reference_loan() {
        // 5,000,000 at 8.6% over 25 years: EMI ~ 40,599
        let r = dec!(8.6) / dec!(100) / dec!(12);
        let emi = monthly_installment(dec!(5_000_000), r, 300).unwrap();
        assert!(
            (emi - dec!(40599)).abs() < dec!(5),
            "Expected EMI ~40,599, got {}",
            emi
        );
    }

    #[test]
    fn test_installment_zero_rate_is_linear() {
        let emi = monthly_installment(dec!(1_200_000), Decimal::ZERO, 120).unwrap();
        assert_eq!(emi, dec!(10_000));
    }

    #[test]
    fn test_installment_zero_principal() {
        let emi = monthly_installment(Decimal::ZERO, dec!(0.005), 60).unwrap();
        assert_eq!(emi, Decimal::ZERO);
    }

    #[test]
    fn test_installment_single_period() {
        // One period repays principal plus one month of interest.
        let emi = monthly_installment(dec!(1000), dec!(0.01), 1).unwrap();
        assert_eq!(emi, dec!(1010));
    }

    #[test]
    fn test_installment_zero_periods_rejected() {
        assert!(monthly_installment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_installment_negative_principal_rejected() {
        assert!(monthly_installment(dec!(-1), dec!(0.01), 12).is_err());
    }
}
