use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::Zero;
use shared::OrderItem;

/// Currency amounts carry two fractional digits.
pub const CURRENCY_SCALE: i64 = 2;

/// Volume discount: when the subtotal is strictly above `threshold`, the
/// whole subtotal is reduced by `rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPolicy {
    pub threshold: BigDecimal,
    pub rate: BigDecimal,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            threshold: BigDecimal::from(1000),
            rate: BigDecimal::from(1) / BigDecimal::from(10),
        }
    }
}

impl DiscountPolicy {
    pub fn new(threshold: BigDecimal, rate: BigDecimal) -> Self {
        Self { threshold, rate }
    }

    pub fn subtotal(items: &[OrderItem]) -> BigDecimal {
        items
            .iter()
            .fold(BigDecimal::zero(), |sum, item| sum + item.line_total())
    }

    /// Subtotal of `items` with the discount applied, rounded half-up to
    /// cents.
    pub fn total(&self, items: &[OrderItem]) -> BigDecimal {
        let subtotal = Self::subtotal(items);
        let total = if subtotal > self.threshold {
            &subtotal * (BigDecimal::from(1) - &self.rate)
        } else {
            subtotal
        };
        total.with_scale_round(CURRENCY_SCALE, RoundingMode::HalfUp)
    }
}
