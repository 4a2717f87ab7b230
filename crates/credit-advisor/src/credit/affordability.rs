use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

/// Annual interest rate applied to every application.
pub const DEFAULT_ANNUAL_RATE: Decimal = dec!(0.20);

/// Share of monthly income (percent) an installment may consume.
pub const DEFAULT_MAX_INSTALLMENT_RATIO: Decimal = dec!(35);

const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AffordabilityError {
    #[error("loan term must be at least one month")]
    ZeroTerm,
    #[error("annual interest rate {0} must not be negative")]
    NegativeRate(Decimal),
    #[error("amortization arithmetic overflowed")]
    Overflow,
}

/// Fixed monthly payment amortizing `amount` over `term_months` at `annual_rate`.
///
/// The result is rounded to cents, midpoint away from zero. A zero rate spreads
/// the principal evenly across the term.
pub fn installment(
    amount: Decimal,
    term_months: u32,
    annual_rate: Decimal,
) -> Result<Decimal, AffordabilityError> {
    let payment = match compounding(term_months, annual_rate)? {
        Compounding::Flat { months } => amount
            .checked_div(months)
            .ok_or(AffordabilityError::Overflow)?,
        Compounding::Periodic { rate, growth } => {
            let numerator = amount
                .checked_mul(rate)
                .and_then(|value| value.checked_mul(growth))
                .ok_or(AffordabilityError::Overflow)?;
            numerator
                .checked_div(growth - Decimal::ONE)
                .ok_or(AffordabilityError::Overflow)?
        }
    };

    Ok(round_currency(payment))
}

/// Largest principal whose installment stays within the standard share of
/// `monthly_income`.
pub fn max_affordable_amount(
    monthly_income: Decimal,
    term_months: u32,
    annual_rate: Decimal,
) -> Result<Decimal, AffordabilityError> {
    let cap = installment_cap(monthly_income, DEFAULT_MAX_INSTALLMENT_RATIO)?;
    principal_for_installment(cap, term_months, annual_rate)
}

/// Inverse of [`installment`]: the principal that `payment` amortizes.
///
/// Truncated to cents so the principal never exceeds what the payment covers.
pub fn principal_for_installment(
    payment: Decimal,
    term_months: u32,
    annual_rate: Decimal,
) -> Result<Decimal, AffordabilityError> {
    let principal = match compounding(term_months, annual_rate)? {
        Compounding::Flat { months } => payment
            .checked_mul(months)
            .ok_or(AffordabilityError::Overflow)?,
        Compounding::Periodic { rate, growth } => {
            let denominator = rate
                .checked_mul(growth)
                .ok_or(AffordabilityError::Overflow)?;
            payment
                .checked_mul(growth - Decimal::ONE)
                .and_then(|value| value.checked_div(denominator))
                .ok_or(AffordabilityError::Overflow)?
        }
    };

    Ok(principal.round_dp_with_strategy(2, RoundingStrategy::ToZero))
}

/// Monthly payment ceiling for an income and a percentage cap.
pub fn installment_cap(
    monthly_income: Decimal,
    max_ratio_percent: Decimal,
) -> Result<Decimal, AffordabilityError> {
    monthly_income
        .checked_mul(max_ratio_percent)
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(AffordabilityError::Overflow)
}

/// Installment as a percentage of monthly income, unrounded.
pub(crate) fn installment_ratio(
    installment: Decimal,
    monthly_income: Decimal,
) -> Result<Decimal, AffordabilityError> {
    installment
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.checked_div(monthly_income))
        .ok_or(AffordabilityError::Overflow)
}

pub(crate) fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

enum Compounding {
    Flat { months: Decimal },
    Periodic { rate: Decimal, growth: Decimal },
}

fn compounding(term_months: u32, annual_rate: Decimal) -> Result<Compounding, AffordabilityError> {
    if term_months == 0 {
        return Err(AffordabilityError::ZeroTerm);
    }
    if annual_rate.is_sign_negative() && !annual_rate.is_zero() {
        return Err(AffordabilityError::NegativeRate(annual_rate));
    }

    let months = Decimal::from(term_months);
    if annual_rate.is_zero() {
        return Ok(Compounding::Flat { months });
    }

    let rate = annual_rate / MONTHS_PER_YEAR;
    let growth = (Decimal::ONE + rate)
        .checked_powi(i64::from(term_months))
        .ok_or(AffordabilityError::Overflow)?;

    Ok(Compounding::Periodic { rate, growth })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_installment_matches_reference_value() {
        let payment = installment(dec!(10000), 36, DEFAULT_ANNUAL_RATE).expect("installment");
        assert_eq!(payment, dec!(371.64));
    }

    #[test]
    fn installment_is_monotonic_in_amount() {
        for term in [12, 24, 36, 48, 60] {
            let mut previous = Decimal::ZERO;
            for step in 1..=50u32 {
                let amount = Decimal::from(step * 1000);
                let payment = installment(amount, term, DEFAULT_ANNUAL_RATE).expect("installment");
                assert!(payment > previous, "term {term}: {payment} <= {previous}");
                previous = payment;
            }
        }
    }

    #[test]
    fn zero_term_is_rejected() {
        assert_eq!(
            installment(dec!(5000), 0, DEFAULT_ANNUAL_RATE),
            Err(AffordabilityError::ZeroTerm)
        );
        assert_eq!(
            max_affordable_amount(dec!(2000), 0, DEFAULT_ANNUAL_RATE),
            Err(AffordabilityError::ZeroTerm)
        );
    }

    #[test]
    fn negative_rate_is_rejected() {
        assert_eq!(
            installment(dec!(5000), 12, dec!(-0.05)),
            Err(AffordabilityError::NegativeRate(dec!(-0.05)))
        );
    }

    #[test]
    fn zero_rate_amortizes_linearly() {
        assert_eq!(installment(dec!(4200), 12, Decimal::ZERO), Ok(dec!(350)));
        assert_eq!(
            max_affordable_amount(dec!(1000), 12, Decimal::ZERO),
            Ok(dec!(4200))
        );
    }

    #[test]
    fn max_affordable_amount_inverts_the_installment() {
        let amount = max_affordable_amount(dec!(1000), 12, DEFAULT_ANNUAL_RATE).expect("amount");
        assert_eq!(amount, dec!(3778.28));

        let payment = installment(amount, 12, DEFAULT_ANNUAL_RATE).expect("installment");
        assert!(payment <= dec!(350));
    }
}
