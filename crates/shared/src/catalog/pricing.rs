use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

pub const MIN_DISCOUNT_PERCENT: u32 = 10;
pub const MAX_DISCOUNT_PERCENT: u32 = 50;

/// Whole-number percentage shown on the sale badge.
///
/// Only meaningful when the product is on sale and the original price is strictly
/// higher than the current one; otherwise there is no badge.
pub fn discount_percentage(
    price: Decimal,
    original_price: Option<Decimal>,
    on_sale: bool,
) -> Option<i32> {
    let original = original_price?;
    if !on_sale || original <= price || original <= Decimal::ZERO {
        return None;
    }

    let pct = (Decimal::ONE - price / original) * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
}

/// Applies `percent` off `original`, rounded half away from zero to cents.
///
/// The discount is always at least one currency unit; the result never goes below zero.
pub fn discounted_price(original: Decimal, percent: u32) -> Decimal {
    let factor = Decimal::ONE - Decimal::from(percent) / Decimal::ONE_HUNDRED;
    let mut discounted = (original * factor)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if original - discounted < Decimal::ONE {
        discounted = original - Decimal::ONE;
    }

    discounted.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_requires_sale_and_higher_original() {
        let price = Decimal::new(6000, 2);
        let original = Decimal::new(8000, 2);

        assert_eq!(discount_percentage(price, Some(original), true), Some(25));
        assert_eq!(discount_percentage(price, Some(original), false), None);
        assert_eq!(discount_percentage(price, Some(price), true), None);
        assert_eq!(discount_percentage(price, None, true), None);
    }

    #[test]
    fn badge_rounds_to_whole_percent() {
        // 599.99 against 799.99 is 25.0003% off
        let pct = discount_percentage(Decimal::new(59999, 2), Some(Decimal::new(79999, 2)), true);
        assert_eq!(pct, Some(25));
    }

    #[test]
    fn discount_range_on_one_hundred() {
        let original = Decimal::ONE_HUNDRED;
        for pct in MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT {
            let price = discounted_price(original, pct);
            assert!(price >= Decimal::from(50), "{pct}% gave {price}");
            assert!(price <= Decimal::from(90), "{pct}% gave {price}");
            assert!(original - price >= Decimal::ONE);
        }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 19.99 * 0.85 = 16.9915 -> 16.99
        assert_eq!(discounted_price(Decimal::new(1999, 2), 15), Decimal::new(1699, 2));
        // 0.35 * 0.9 = 0.315 -> 0.32, then the one-unit floor kicks in and clamps at zero
        assert_eq!(discounted_price(Decimal::new(35, 2), 10), Decimal::ZERO);
    }

    #[test]
    fn small_prices_still_drop_by_one_unit() {
        // 5.00 * 0.9 = 4.50, only 0.50 off
        assert_eq!(discounted_price(Decimal::from(5), 10), Decimal::from(4));
    }
}
