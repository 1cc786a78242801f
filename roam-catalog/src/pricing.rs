use serde::{Deserialize, Serialize};

use crate::promo::{DiscountType, PromoCode};

/// Priced breakdown for a booking attempt. All amounts are integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub base_amount_cents: i64,
    pub discount_amount_cents: i64,
    pub final_amount_cents: i64,
}

/// Price a party of `num_guests` at `price_cents` per guest, with an
/// optional promo applied.
///
/// Pure and deterministic: same inputs, same quote. The discount can never
/// push the final amount below zero.
pub fn quote(price_cents: i64, num_guests: i32, promo: Option<&PromoCode>) -> Quote {
    let base_amount_cents = price_cents * num_guests as i64;
    let discount_amount_cents = promo
        .map(|p| discount_on(base_amount_cents, p))
        .unwrap_or(0);

    Quote {
        base_amount_cents,
        discount_amount_cents,
        final_amount_cents: base_amount_cents - discount_amount_cents,
    }
}

/// Discount a promo grants on a base amount, clamped to `[0, base]`.
///
/// Percentage values are whole percents and the division truncates, keeping
/// the math in integer cents end to end.
pub fn discount_on(base_amount_cents: i64, promo: &PromoCode) -> i64 {
    let raw = match promo.discount_type {
        DiscountType::Percentage => {
            let discount = base_amount_cents * promo.discount_value / 100;
            match promo.max_discount_cents {
                Some(cap) => discount.min(cap),
                None => discount,
            }
        }
        DiscountType::Fixed => promo.discount_value,
    };

    raw.clamp(0, base_amount_cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promo::test_support::promo;

    #[test]
    fn test_no_promo_is_identity() {
        let q = quote(4500, 3, None);
        assert_eq!(q.base_amount_cents, 13500);
        assert_eq!(q.discount_amount_cents, 0);
        assert_eq!(q.final_amount_cents, 13500);
    }

    #[test]
    fn test_percentage_discount() {
        // 10% off $100.00
        let p = promo("SAVE10", DiscountType::Percentage, 10);
        let q = quote(10000, 1, Some(&p));
        assert_eq!(q.discount_amount_cents, 1000);
        assert_eq!(q.final_amount_cents, 9000);
    }

    #[test]
    fn test_percentage_capped_by_max_discount() {
        let mut p = promo("BIG50", DiscountType::Percentage, 50);
        p.max_discount_cents = Some(2000);
        let q = quote(10000, 1, Some(&p));
        assert_eq!(q.discount_amount_cents, 2000);
        assert_eq!(q.final_amount_cents, 8000);
    }

    #[test]
    fn test_fixed_discount_clamped_to_base() {
        // $500 off a $100 base never goes negative
        let p = promo("FLAT500", DiscountType::Fixed, 50000);
        let q = quote(10000, 1, Some(&p));
        assert_eq!(q.discount_amount_cents, 10000);
        assert_eq!(q.final_amount_cents, 0);
    }

    #[test]
    fn test_quote_is_deterministic() {
        let p = promo("SAVE10", DiscountType::Percentage, 10);
        assert_eq!(quote(7300, 4, Some(&p)), quote(7300, 4, Some(&p)));
    }
}
