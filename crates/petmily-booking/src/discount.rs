// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Discount tiers: an ordered {key → percentage} table shared by the
// walking-package discount (one tier) and product subscriptions (five tiers).
//
// All arithmetic is in whole won: the discount is floored, so a discounted
// price never drops below the exact fractional value.

use petmily_core::error::{PetmilyError, Result};
use serde::Serialize;

/// One row of a discount table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountTier<K> {
    pub key: K,
    /// Whole percent, 0..=100.
    pub percent: u32,
}

/// Ordered discount tiers. Percentages never decrease along the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountTable<K> {
    tiers: Vec<DiscountTier<K>>,
}

/// Outcome of applying a percentage to a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Discounted {
    pub original: u64,
    pub discount: u64,
    pub discounted: u64,
}

impl<K: Copy + PartialEq + std::fmt::Debug> DiscountTable<K> {
    /// Build a table from tiers in display order.
    ///
    /// Rejects duplicate keys, percentages above 100, and any tier whose
    /// percentage is lower than the tier before it.
    pub fn new(tiers: impl IntoIterator<Item = (K, u32)>) -> Result<Self> {
        let tiers: Vec<DiscountTier<K>> = tiers
            .into_iter()
            .map(|(key, percent)| DiscountTier { key, percent })
            .collect();

        for (i, tier) in tiers.iter().enumerate() {
            if tier.percent > 100 {
                return Err(PetmilyError::InvalidDiscountTable(format!(
                    "{:?} has {}% (max 100%)",
                    tier.key, tier.percent
                )));
            }
            if tiers[..i].iter().any(|t| t.key == tier.key) {
                return Err(PetmilyError::InvalidDiscountTable(format!(
                    "{:?} appears twice",
                    tier.key
                )));
            }
            if let Some(prev) = i.checked_sub(1).map(|p| &tiers[p]) {
                if tier.percent < prev.percent {
                    return Err(PetmilyError::InvalidDiscountTable(format!(
                        "{:?} ({}%) is lower than {:?} ({}%)",
                        tier.key, tier.percent, prev.key, prev.percent
                    )));
                }
            }
        }

        Ok(Self { tiers })
    }

    /// Build a table from tiers already known to be valid (built-in tables).
    pub(crate) fn from_valid(tiers: Vec<DiscountTier<K>>) -> Self {
        debug_assert!(tiers.windows(2).all(|w| w[0].percent <= w[1].percent));
        Self { tiers }
    }

    /// A table with exactly one discounted key.
    pub fn single(key: K, percent: u32) -> Result<Self> {
        Self::new([(key, percent)])
    }

    /// Percentage bound to `key`, or None if the key has no tier.
    pub fn percent_for(&self, key: K) -> Option<u32> {
        self.tiers.iter().find(|t| t.key == key).map(|t| t.percent)
    }

    /// Apply the tier for `key` to `price`. Keys without a tier get no discount.
    pub fn apply(&self, key: K, price: u64) -> Discounted {
        apply_percent(price, self.percent_for(key).unwrap_or(0))
    }

    pub fn tiers(&self) -> &[DiscountTier<K>] {
        &self.tiers
    }
}

/// Take `percent`% off `price`, flooring the discount to whole won.
pub fn apply_percent(price: u64, percent: u32) -> Discounted {
    let percent = u64::from(percent.min(100));
    let discount = price.saturating_mul(percent) / 100;
    Discounted {
        original: price,
        discount,
        discounted: price - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_floors() {
        let d = apply_percent(15_000, 10);
        assert_eq!(d.discount, 1_500);
        assert_eq!(d.discounted, 13_500);

        let d = apply_percent(9_999, 10);
        assert_eq!(d.discount, 999);
        assert_eq!(d.discounted, 9_000);
    }

    #[test]
    fn missing_key_means_no_discount() {
        let table = DiscountTable::single("package", 10).expect("table");
        assert_eq!(table.percent_for("single"), None);
        let d = table.apply("single", 25_000);
        assert_eq!(d.discount, 0);
        assert_eq!(d.discounted, 25_000);
    }

    #[test]
    fn decreasing_tiers_are_rejected() {
        let err = DiscountTable::new([("a", 10), ("b", 5)]).unwrap_err();
        assert!(matches!(err, PetmilyError::InvalidDiscountTable(_)));
    }

    #[test]
    fn equal_neighbours_are_allowed() {
        assert!(DiscountTable::new([("a", 5), ("b", 5), ("c", 7)]).is_ok());
    }

    #[test]
    fn duplicates_and_overflow_are_rejected() {
        assert!(DiscountTable::new([("a", 5), ("a", 7)]).is_err());
        assert!(DiscountTable::single("a", 101).is_err());
    }
}
