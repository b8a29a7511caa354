use crate::error::{Result, VendingError};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// Power of ten of the smallest non-zero amount a `Decimal` can hold.
const MIN_ORDER: i64 = -28;
/// Power of ten of the leading digit of [`Money::MAX_CREDIT`].
const MAX_ORDER: i64 = 26;

/// A currency value in dollars.
///
/// Wraps `rust_decimal::Decimal` so prices, inserted totals and change are
/// exact base-10 values. Rounding only happens when the value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest total the machine will hold. Up to this bound a total minus a
    /// price still fits with whole cents.
    pub const MAX_CREDIT: Self = Self(dec!(792281625142643375935439503.35));

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds an inserted amount, failing when the sum would pass
    /// [`Money::MAX_CREDIT`]. Nothing is added on failure.
    pub fn checked_add(self, amount: Amount) -> Result<Self> {
        self.0
            .checked_add(amount.0)
            .filter(|sum| *sum <= Self::MAX_CREDIT.0)
            .map(Self)
            .ok_or(VendingError::AmountOverflow)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_string();
        // Scale is at most 2 here; pad the cents since values near the top of
        // the decimal range cannot be rescaled to carry them.
        let (whole, cents) = rounded.split_once('.').unwrap_or((&rounded, ""));
        write!(f, "${whole}.{cents:0<2}")
    }
}

/// A strictly positive amount of money inserted into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Validates a single insertion.
    ///
    /// # Errors
    ///
    /// * `NonPositiveAmount` for zero or negative values.
    /// * `AmountOverflow` above [`Money::MAX_CREDIT`].
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            Err(VendingError::NonPositiveAmount)
        } else if value > Money::MAX_CREDIT.0 {
            Err(VendingError::AmountOverflow)
        } else {
            Ok(Self(value))
        }
    }

    /// Parses user input such as `1`, `0.25` or `2.5e-1`.
    ///
    /// Numbers outside what the machine can hold are still numbers: they fail
    /// with `AmountOverflow` or `AmountTooSmall`, never `InvalidAmount`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || VendingError::InvalidAmount(trimmed.to_string());
        let literal = NumericLiteral::scan(trimmed).ok_or_else(invalid)?;

        let Some(order) = literal.order else {
            return Err(VendingError::NonPositiveAmount);
        };
        if literal.negative {
            return Err(VendingError::NonPositiveAmount);
        }
        if order < MIN_ORDER {
            return Err(VendingError::AmountTooSmall);
        }
        if order > MAX_ORDER {
            return Err(VendingError::AmountOverflow);
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(&trimmed.to_ascii_lowercase()))
            .map_err(|_| invalid())?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Sign and magnitude of a decimal literal like `-12.5e3`, read without
/// converting it.
#[derive(Debug, PartialEq)]
struct NumericLiteral {
    negative: bool,
    /// Power of ten of the leading non-zero digit; `None` when all digits are zero.
    order: Option<i64>,
}

impl NumericLiteral {
    fn scan(text: &str) -> Option<Self> {
        let (negative, rest) = split_sign(text);
        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(index) => (&rest[..index], Some(&rest[index + 1..])),
            None => (rest, None),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return None;
        }
        let exponent = match exponent {
            Some(exponent) => parse_exponent(exponent)?,
            None => 0,
        };

        let order = match whole.find(|c: char| c != '0') {
            Some(first) => Some((whole.len() - first - 1) as i64),
            None => fraction
                .find(|c: char| c != '0')
                .map(|first| -(first as i64) - 1),
        };
        Some(Self {
            negative,
            order: order.map(|order| order.saturating_add(exponent)),
        })
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = split_sign(text);
    if digits.is_empty() || !is_digits(digits) {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display_two_decimals() {
        assert_eq!(Money::new(dec!(1.5)).to_string(), "$1.50");
        assert_eq!(Money::new(dec!(0)).to_string(), "$0.00");
        assert_eq!(Money::new(dec!(0.125)).to_string(), "$0.13");
        assert_eq!(Money::new(dec!(12)).to_string(), "$12.00");
    }

    #[test]
    fn test_money_display_at_top_of_range() {
        assert_eq!(
            Money::new(Decimal::MAX).to_string(),
            "$79228162514264337593543950335.00"
        );
        let change = Money::MAX_CREDIT - Money::new(dec!(0.75));
        assert_eq!(change.to_string(), "$792281625142643375935439502.60");
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(VendingError::NonPositiveAmount)
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(VendingError::NonPositiveAmount)
        ));
        assert!(Amount::new(Money::MAX_CREDIT.0).is_ok());
        assert!(matches!(
            Amount::new(Decimal::MAX),
            Err(VendingError::AmountOverflow)
        ));
    }

    #[test]
    fn test_amount_parse() {
        assert_eq!(Amount::parse("1.00").unwrap().value(), dec!(1.00));
        assert_eq!(Amount::parse("  2 ").unwrap().value(), dec!(2));
        assert_eq!(Amount::parse("2.5e-1").unwrap().value(), dec!(0.25));
        assert!(matches!(
            Amount::parse("abc"),
            Err(VendingError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::parse(""),
            Err(VendingError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::parse("1.2.3"),
            Err(VendingError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::parse("-3"),
            Err(VendingError::NonPositiveAmount)
        ));
        assert!(matches!(
            Amount::parse("0.000"),
            Err(VendingError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_parse_huge_numbers_overflow() {
        for input in ["1e30", "100000000000000000000000000000", "9e99999999999999999999"] {
            assert!(
                matches!(Amount::parse(input), Err(VendingError::AmountOverflow)),
                "{input}"
            );
        }
        assert!(matches!(
            Amount::parse("-1e30"),
            Err(VendingError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_parse_tiny_numbers_are_too_small() {
        for input in ["1e-40", "0.000000000000000000000000000001"] {
            assert!(
                matches!(Amount::parse(input), Err(VendingError::AmountTooSmall)),
                "{input}"
            );
        }
        assert_eq!(Amount::parse("1e-28").unwrap().value(), dec!(0.0000000000000000000000000001));
    }

    #[test]
    fn test_numeric_literal_scan() {
        assert_eq!(
            NumericLiteral::scan("-12.5e3"),
            Some(NumericLiteral { negative: true, order: Some(4) })
        );
        assert_eq!(
            NumericLiteral::scan("0.003"),
            Some(NumericLiteral { negative: false, order: Some(-3) })
        );
        assert_eq!(
            NumericLiteral::scan("00.0"),
            Some(NumericLiteral { negative: false, order: None })
        );
        assert_eq!(NumericLiteral::scan("."), None);
        assert_eq!(NumericLiteral::scan("1e"), None);
        assert_eq!(NumericLiteral::scan("nan"), None);
    }

    #[test]
    fn test_checked_add_overflow() {
        let one = Amount::new(dec!(1)).unwrap();
        assert!(matches!(
            Money::MAX_CREDIT.checked_add(one),
            Err(VendingError::AmountOverflow)
        ));
        assert_eq!(
            Money::ZERO.checked_add(one).unwrap(),
            Money::new(dec!(1))
        );
    }

    #[test]
    fn test_decimal_accumulation_is_exact() {
        let mut total = Money::ZERO;
        for _ in 0..10 {
            total = total.checked_add(Amount::new(dec!(0.1)).unwrap()).unwrap();
        }
        assert_eq!(total, Money::new(dec!(1.0)));
    }
}
