//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An intermediate amount could not be represented.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// Sums a list of prices.
///
/// An empty list sums to zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the running sum could not be represented.
pub fn total_price<I>(prices: I) -> Result<Decimal, PricingError>
where
    I: IntoIterator<Item = Decimal>,
{
    prices
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, price| acc.checked_add(price))
        .ok_or(PricingError::Overflow)
}

/// Applies a percentage discount (expressed in points, `10` meaning 10%) to a
/// subtotal and rounds to a whole amount, halves going up.
///
/// The discount is not range checked: `0` returns the subtotal, `100` returns
/// zero, and values outside `0..=100` are applied as given.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the discount or subtotal could not be represented.
pub fn discounted_price(subtotal: Decimal, discount: Decimal) -> Result<Decimal, PricingError> {
    let remaining = Decimal::ONE_HUNDRED
        .checked_sub(discount)
        .and_then(|points| points.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::Overflow)?;

    let discounted = Percentage::from(remaining) * subtotal;

    let strategy = if discounted.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };

    Ok(discounted.round_dp_with_strategy(0, strategy))
}

/// Formats an amount without grouping, e.g. `1200` or `99.5`.
pub fn format_plain(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Formats an amount with thousands separators, e.g. `2,955`.
pub fn format_grouped(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let text = normalized.abs().to_string();

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(text.len() + digits.len() / 3 + 1);

    if normalized.is_sign_negative() && !normalized.is_zero() {
        grouped.push('-');
    }

    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(*digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn total_price_sums_every_price() -> TestResult {
        let total = total_price([Decimal::from(1200), Decimal::from(1755)])?;

        assert_eq!(total, Decimal::from(2955));

        Ok(())
    }

    #[test]
    fn total_price_of_nothing_is_zero() -> TestResult {
        assert_eq!(total_price([])?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn total_price_reports_overflow() {
        let result = total_price([Decimal::MAX, Decimal::ONE]);

        assert_eq!(result, Err(PricingError::Overflow));
    }

    #[test]
    fn discounted_price_rounds_halves_up() -> TestResult {
        // 1950 * 0.9 = 1755
        assert_eq!(
            discounted_price(Decimal::from(1950), Decimal::from(10))?,
            Decimal::from(1755)
        );

        // 25 * 0.9 = 22.5
        assert_eq!(
            discounted_price(Decimal::from(25), Decimal::from(10))?,
            Decimal::from(23)
        );

        // 25 * -0.5 = -12.5
        assert_eq!(
            discounted_price(Decimal::from(25), Decimal::from(150))?,
            Decimal::from(-12)
        );

        Ok(())
    }

    #[test]
    fn discounted_price_edges() -> TestResult {
        let subtotal = Decimal::from(2400);

        assert_eq!(discounted_price(subtotal, Decimal::ZERO)?, subtotal);
        assert_eq!(
            discounted_price(subtotal, Decimal::ONE_HUNDRED)?,
            Decimal::ZERO
        );

        // Out-of-range discounts are applied as given.
        assert_eq!(
            discounted_price(subtotal, Decimal::from(-50))?,
            Decimal::from(3600)
        );

        Ok(())
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_plain(Decimal::from(1200)), "1200");
        assert_eq!(format_grouped(Decimal::from(2955)), "2,955");
        assert_eq!(format_grouped(Decimal::from(1_234_567)), "1,234,567");
        assert_eq!(format_grouped(Decimal::from(950)), "950");
        assert_eq!(format_grouped(Decimal::new(123_450, 2)), "1,234.5");
        assert_eq!(format_grouped(Decimal::from(-1200)), "-1,200");
        assert_eq!(format_grouped(Decimal::ZERO), "0");
    }
}
