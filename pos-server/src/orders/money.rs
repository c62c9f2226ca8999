//! Money arithmetic using rust_decimal for precision
//!
//! All monetary values are `Decimal`, rounded to the currency's minor unit
//! (2 decimal places, midpoint away from zero) wherever a value is persisted
//! or compared.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to the minor unit
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line amount: unit price times quantity, rounded
#[inline]
pub fn line_amount(price: Decimal, qty: u32) -> Decimal {
    round_money(price * Decimal::from(qty))
}

/// Compare two monetary values for equality after rounding to the minor unit
///
/// Absorbs representation noise from client-supplied amounts; the comparison
/// itself is exact.
#[inline]
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    round_money(a) == round_money(b)
}

/// Net payable: subtotal minus discount, floored at zero
#[inline]
pub fn net_amount(subtotal: Decimal, discount: Decimal) -> Decimal {
    (subtotal - discount).max(Decimal::ZERO)
}

/// Split an order-level discount across line amounts proportionally
///
/// Each share is `(line / subtotal) * discount` rounded to the minor unit,
/// except the last non-zero line, which absorbs the rounding remainder so the
/// shares always sum exactly to `discount`. A zero subtotal yields all-zero
/// shares.
pub fn split_discount(line_amounts: &[Decimal], discount: Decimal) -> Vec<Decimal> {
    let subtotal: Decimal = line_amounts.iter().sum();
    if subtotal <= Decimal::ZERO || discount <= Decimal::ZERO {
        return vec![Decimal::ZERO; line_amounts.len()];
    }

    let last_nonzero = line_amounts.iter().rposition(|a| *a > Decimal::ZERO);

    let mut shares = Vec::with_capacity(line_amounts.len());
    let mut allocated = Decimal::ZERO;
    for (i, line) in line_amounts.iter().enumerate() {
        let share = if Some(i) == last_nonzero {
            discount - allocated
        } else {
            round_money(line / subtotal * discount)
        };
        allocated += share;
        shares.push(share);
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn dec(value: f64) -> Decimal {
        Decimal::from_f64(value).unwrap()
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec(0.005)), dec(0.01));
        assert_eq!(round_money(dec(0.004)), dec(0.0));
        assert_eq!(round_money(dec(10.999)), dec(11.0));
    }

    #[test]
    fn test_line_amount() {
        assert_eq!(line_amount(dec(10.99), 3), dec(32.97));
        assert_eq!(line_amount(dec(0.0), 5), dec(0.0));
    }

    #[test]
    fn test_money_eq_absorbs_noise() {
        assert!(money_eq(dec(450.0), dec(450.0)));
        assert!(money_eq(dec(449.999), dec(450.0)));
        assert!(!money_eq(dec(449.0), dec(450.0)));
        assert!(!money_eq(dec(449.98), dec(450.0)));
    }

    #[test]
    fn test_net_amount_floors_at_zero() {
        assert_eq!(net_amount(dec(500.0), dec(50.0)), dec(450.0));
        assert_eq!(net_amount(dec(50.0), dec(80.0)), Decimal::ZERO);
    }

    #[test]
    fn test_split_discount_single_line() {
        // No rounding to distribute: the single line takes the whole discount
        let shares = split_discount(&[dec(500.0)], dec(50.0));
        assert_eq!(shares, vec![dec(50.0)]);
    }

    #[test]
    fn test_split_discount_proportional() {
        let shares = split_discount(&[dec(100.0), dec(300.0)], dec(40.0));
        assert_eq!(shares, vec![dec(10.0), dec(30.0)]);
        let total: Decimal = shares.iter().sum();
        assert_eq!(total, dec(40.0));
    }

    #[test]
    fn test_split_discount_remainder_goes_to_last_line() {
        // 10 / 3 style split: 3.33 + 3.33 + 3.34
        let shares = split_discount(&[dec(10.0), dec(10.0), dec(10.0)], dec(10.0));
        assert_eq!(shares[0], dec(3.33));
        assert_eq!(shares[1], dec(3.33));
        assert_eq!(shares[2], dec(3.34));
        let total: Decimal = shares.iter().sum();
        assert_eq!(total, dec(10.0));
    }

    #[test]
    fn test_split_discount_many_small_lines_sums_exactly() {
        let lines: Vec<Decimal> = (0..97).map(|_| dec(0.07)).collect();
        let shares = split_discount(&lines, dec(1.0));
        let total: Decimal = shares.iter().sum();
        assert_eq!(total, dec(1.0));
    }

    #[test]
    fn test_split_discount_zero_subtotal() {
        let shares = split_discount(&[dec(0.0), dec(0.0)], dec(10.0));
        assert_eq!(shares, vec![Decimal::ZERO, Decimal::ZERO]);
    }

    #[test]
    fn test_split_discount_zero_discount() {
        let shares = split_discount(&[dec(100.0)], Decimal::ZERO);
        assert_eq!(shares, vec![Decimal::ZERO]);
    }

    #[test]
    fn test_split_discount_skips_trailing_zero_line() {
        // The remainder lands on the last line with a non-zero amount
        let shares = split_discount(&[dec(10.0), dec(10.0), dec(0.0)], dec(5.0));
        assert_eq!(shares[2], Decimal::ZERO);
        let total: Decimal = shares.iter().sum();
        assert_eq!(total, dec(5.0));
    }

    #[test]
    fn test_split_discount_equal_to_subtotal() {
        // Full discount: every line's share equals its amount
        let lines = [dec(12.5), dec(7.5)];
        let shares = split_discount(&lines, dec(20.0));
        assert_eq!(shares, vec![dec(12.5), dec(7.5)]);
    }

    #[test]
    fn test_decimal_precision_accumulation() {
        // Sum 0.01 one thousand times: Decimal stays exact where f64 drifts
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += dec(0.01);
        }
        assert_eq!(total, dec(10.0));
    }
}
