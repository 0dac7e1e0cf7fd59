// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Walk pricing: base price by duration, package discount, final price.
//
// Durations outside the price table are an explicit error rather than being
// priced as an hour-long walk.

use petmily_core::error::{PetmilyError, Result};
use petmily_core::types::{WalkType, duration_label};
use serde::{Deserialize, Serialize};

use crate::discount::{DiscountTable, DiscountTier};

/// Base price in won for each supported duration (minutes).
pub const BASE_PRICES: [(u32, u64); 3] = [(30, 15_000), (60, 25_000), (90, 35_000)];

/// Discount applied to walking packages, in percent.
pub const PACKAGE_DISCOUNT_PERCENT: u32 = 10;

/// Settled price of a walk. `final_price == base_price - discount_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub base_price: u64,
    pub discount_amount: u64,
    pub final_price: u64,
}

/// One row of the price breakdown on the payment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLine {
    pub label: String,
    pub amount: u64,
    /// Shown with a leading minus sign.
    pub deduction: bool,
}

impl PriceLine {
    pub fn display_amount(&self) -> String {
        if self.deduction {
            format!("-{}", format_won(self.amount))
        } else {
            format_won(self.amount)
        }
    }
}

/// Computes walk prices from a duration price table and a walk-type discount table.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    base_prices: Vec<(u32, u64)>,
    walk_type_discounts: DiscountTable<WalkType>,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl PricingEngine {
    /// The published price list: 30/60/90 minutes, 10% off packages.
    pub fn standard() -> Self {
        Self {
            base_prices: BASE_PRICES.to_vec(),
            walk_type_discounts: DiscountTable::from_valid(vec![DiscountTier {
                key: WalkType::Package,
                percent: PACKAGE_DISCOUNT_PERCENT,
            }]),
        }
    }

    /// Engine with a custom price list and walk-type discounts.
    ///
    /// The price list must be non-empty, with unique non-zero durations.
    pub fn new(
        base_prices: Vec<(u32, u64)>,
        walk_type_discounts: DiscountTable<WalkType>,
    ) -> Result<Self> {
        if base_prices.is_empty() {
            return Err(PetmilyError::InvalidPriceTable("no durations".into()));
        }
        for (i, (minutes, _)) in base_prices.iter().enumerate() {
            if *minutes == 0 {
                return Err(PetmilyError::InvalidPriceTable(
                    "duration must be at least 1 minute".into(),
                ));
            }
            if base_prices[..i].iter().any(|(m, _)| m == minutes) {
                return Err(PetmilyError::InvalidPriceTable(format!(
                    "duplicate duration: {minutes} minutes"
                )));
            }
        }
        Ok(Self {
            base_prices,
            walk_type_discounts,
        })
    }

    /// Durations this engine can price, in table order.
    pub fn durations(&self) -> impl Iterator<Item = u32> + '_ {
        self.base_prices.iter().map(|(minutes, _)| *minutes)
    }

    pub fn supports(&self, minutes: u32) -> bool {
        self.base_prices.iter().any(|(m, _)| *m == minutes)
    }

    /// Base price for a duration.
    pub fn base_price(&self, minutes: u32) -> Result<u64> {
        self.base_prices
            .iter()
            .find(|(m, _)| *m == minutes)
            .map(|(_, price)| *price)
            .ok_or(PetmilyError::UnsupportedDuration(minutes))
    }

    /// Price a walk: base by duration, minus the walk-type discount.
    pub fn compute_price(&self, minutes: u32, walk_type: WalkType) -> Result<Pricing> {
        let base = self.base_price(minutes)?;
        let applied = self.walk_type_discounts.apply(walk_type, base);
        Ok(Pricing {
            base_price: applied.original,
            discount_amount: applied.discount,
            final_price: applied.discounted,
        })
    }

    /// Breakdown rows: base price, the discount row (packages only), total.
    pub fn price_lines(&self, minutes: u32, walk_type: WalkType) -> Result<Vec<PriceLine>> {
        let pricing = self.compute_price(minutes, walk_type)?;
        let mut lines = vec![PriceLine {
            label: format!("기본 요금 ({minutes}분)"),
            amount: pricing.base_price,
            deduction: false,
        }];
        if let Some(percent) = self.walk_type_discounts.percent_for(walk_type) {
            lines.push(PriceLine {
                label: format!("정기 패키지 할인 ({percent}%)"),
                amount: pricing.discount_amount,
                deduction: true,
            });
        }
        lines.push(PriceLine {
            label: "총 결제 금액".to_string(),
            amount: pricing.final_price,
            deduction: false,
        });
        Ok(lines)
    }

    /// Duration chips with their labels and base prices.
    pub fn duration_options(&self) -> Vec<(u32, String, u64)> {
        self.base_prices
            .iter()
            .map(|(m, price)| (*m, duration_label(*m), *price))
            .collect()
    }
}

/// Price a walk with the standard price list.
pub fn compute_price(minutes: u32, walk_type: WalkType) -> Result<Pricing> {
    PricingEngine::standard().compute_price(minutes, walk_type)
}

/// Format a won amount with thousands separators: `25000` → `"25,000원"`.
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('원');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_walks_match_the_price_table() {
        for (minutes, expected) in [(30, 15_000), (60, 25_000), (90, 35_000)] {
            let pricing = compute_price(minutes, WalkType::Single).expect("price");
            assert_eq!(pricing.base_price, expected);
            assert_eq!(pricing.discount_amount, 0);
            assert_eq!(pricing.final_price, expected);
        }
    }

    #[test]
    fn package_discount_is_floor_of_ten_percent() {
        for minutes in [30, 60, 90] {
            let single = compute_price(minutes, WalkType::Single).expect("single");
            let package = compute_price(minutes, WalkType::Package).expect("package");
            assert_eq!(package.base_price, single.base_price);
            assert_eq!(package.discount_amount, single.base_price / 10);
            assert_eq!(package.final_price, package.base_price - package.discount_amount);
        }
    }

    #[test]
    fn hour_long_package() {
        let pricing = compute_price(60, WalkType::Package).expect("price");
        assert_eq!(
            pricing,
            Pricing {
                base_price: 25_000,
                discount_amount: 2_500,
                final_price: 22_500,
            }
        );
    }

    #[test]
    fn unmapped_duration_is_an_error() {
        for minutes in [0, 45, 120] {
            let err = compute_price(minutes, WalkType::Single).unwrap_err();
            assert!(matches!(err, PetmilyError::UnsupportedDuration(m) if m == minutes));
        }
    }

    #[test]
    fn price_lines_only_show_discount_for_packages() {
        let engine = PricingEngine::standard();
        let single = engine.price_lines(30, WalkType::Single).expect("lines");
        assert_eq!(single.len(), 2);
        assert_eq!(single[1].display_amount(), "15,000원");

        let package = engine.price_lines(90, WalkType::Package).expect("lines");
        assert_eq!(package.len(), 3);
        assert_eq!(package[1].label, "정기 패키지 할인 (10%)");
        assert_eq!(package[1].display_amount(), "-3,500원");
        assert_eq!(package[2].display_amount(), "31,500원");
    }

    #[test]
    fn custom_price_lists_are_checked() {
        let no_discount = || DiscountTable::new(Vec::<(WalkType, u32)>::new()).expect("table");

        let engine = PricingEngine::new(vec![(45, 20_000), (120, 40_000)], no_discount())
            .expect("engine");
        assert_eq!(engine.durations().collect::<Vec<_>>(), vec![45, 120]);
        assert_eq!(
            engine.compute_price(45, WalkType::Package).expect("price").final_price,
            20_000
        );

        for bad in [vec![], vec![(0, 10_000)], vec![(30, 15_000), (30, 16_000)]] {
            assert!(matches!(
                PricingEngine::new(bad, no_discount()),
                Err(PetmilyError::InvalidPriceTable(_))
            ));
        }
    }

    #[test]
    fn won_formatting() {
        assert_eq!(format_won(0), "0원");
        assert_eq!(format_won(999), "999원");
        assert_eq!(format_won(1_000), "1,000원");
        assert_eq!(format_won(1_234_567), "1,234,567원");
    }
}
