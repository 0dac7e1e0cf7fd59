// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recurring product deliveries: cycle-based discount tiers and quotes.
//
// Longer cycles earn larger discounts. The tier table is data, not a
// formula; `DiscountTable` enforces that percentages never decrease.

use petmily_core::config::AppConfig;
use petmily_core::error::{PetmilyError, Result};
use petmily_core::types::{DeliveryDay, SubscriptionCycle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discount::{DiscountTable, DiscountTier};

/// Published cycle discounts, shortest cycle first.
pub const STANDARD_CYCLE_DISCOUNTS: [(SubscriptionCycle, u32); 5] = [
    (SubscriptionCycle::OneWeek, 5),
    (SubscriptionCycle::TwoWeeks, 7),
    (SubscriptionCycle::OneMonth, 10),
    (SubscriptionCycle::TwoMonths, 12),
    (SubscriptionCycle::ThreeMonths, 15),
];

/// What the owner confirmed in the subscription sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSettings {
    pub cycle: SubscriptionCycle,
    pub quantity: u32,
    /// Percentage copied from the cycle's tier.
    pub discount: u32,
    pub delivery_day: DeliveryDay,
}

/// Price of one delivery under a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionQuote {
    pub unit_price: u64,
    pub quantity: u32,
    pub discount_percent: u32,
    pub discounted_unit_price: u64,
    /// Undiscounted `unit_price * quantity`.
    pub subtotal: u64,
    pub total_price: u64,
}

impl SubscriptionQuote {
    pub fn savings(&self) -> u64 {
        self.subtotal - self.total_price
    }
}

/// Quotes subscriptions against a cycle discount table.
#[derive(Debug, Clone)]
pub struct SubscriptionPlanner {
    table: DiscountTable<SubscriptionCycle>,
}

impl Default for SubscriptionPlanner {
    fn default() -> Self {
        Self::standard()
    }
}

impl SubscriptionPlanner {
    /// Planner with the published 5/7/10/12/15% tiers.
    pub fn standard() -> Self {
        Self {
            table: DiscountTable::from_valid(
                STANDARD_CYCLE_DISCOUNTS
                    .iter()
                    .map(|&(key, percent)| DiscountTier { key, percent })
                    .collect(),
            ),
        }
    }

    /// Planner with a custom tier table.
    pub fn new(table: DiscountTable<SubscriptionCycle>) -> Self {
        Self { table }
    }

    /// Tiers in display order.
    pub fn cycles(&self) -> &[DiscountTier<SubscriptionCycle>] {
        self.table.tiers()
    }

    /// Discount percentage for a cycle. Cycles missing from the table are rejected.
    pub fn discount_for(&self, cycle: SubscriptionCycle) -> Result<u32> {
        self.table
            .percent_for(cycle)
            .ok_or_else(|| PetmilyError::UnknownCycle(cycle.as_str().to_string()))
    }

    /// Quote `quantity` units at `unit_price` on `cycle`.
    pub fn quote(&self, cycle: SubscriptionCycle, unit_price: u64, quantity: u32) -> Result<SubscriptionQuote> {
        if quantity == 0 {
            return Err(PetmilyError::InvalidQuantity(quantity));
        }
        let percent = self.discount_for(cycle)?;
        let unit = self.table.apply(cycle, unit_price);
        let qty = u64::from(quantity);
        let quote = SubscriptionQuote {
            unit_price,
            quantity,
            discount_percent: percent,
            discounted_unit_price: unit.discounted,
            subtotal: unit_price.saturating_mul(qty),
            total_price: unit.discounted.saturating_mul(qty),
        };
        debug!(cycle = cycle.as_str(), unit_price, quantity, total = quote.total_price, "subscription quoted");
        Ok(quote)
    }

    /// Settings record for a confirmed subscription.
    pub fn settings(
        &self,
        cycle: SubscriptionCycle,
        quantity: u32,
        delivery_day: DeliveryDay,
    ) -> Result<SubscriptionSettings> {
        if quantity == 0 {
            return Err(PetmilyError::InvalidQuantity(quantity));
        }
        Ok(SubscriptionSettings {
            cycle,
            quantity,
            discount: self.discount_for(cycle)?,
            delivery_day,
        })
    }
}

/// State of the subscription sheet for one product.
#[derive(Debug, Clone)]
pub struct SubscriptionForm {
    planner: SubscriptionPlanner,
    unit_price: u64,
    cycle: SubscriptionCycle,
    quantity: u32,
    delivery_day: DeliveryDay,
}

impl SubscriptionForm {
    pub fn new(planner: SubscriptionPlanner, unit_price: u64, config: &AppConfig) -> Self {
        Self {
            planner,
            unit_price,
            cycle: config.default_subscription_cycle,
            quantity: 1,
            delivery_day: config.default_delivery_day,
        }
    }

    pub fn cycle(&self) -> SubscriptionCycle {
        self.cycle
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn delivery_day(&self) -> DeliveryDay {
        self.delivery_day
    }

    pub fn select_cycle(&mut self, cycle: SubscriptionCycle) -> Result<()> {
        self.planner.discount_for(cycle)?;
        self.cycle = cycle;
        Ok(())
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Decrease the quantity, stopping at 1.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    pub fn select_day(&mut self, day: DeliveryDay) {
        self.delivery_day = day;
    }

    pub fn quote(&self) -> Result<SubscriptionQuote> {
        self.planner.quote(self.cycle, self.unit_price, self.quantity)
    }

    pub fn confirm(&self) -> Result<SubscriptionSettings> {
        self.planner.settings(self.cycle, self.quantity, self.delivery_day)
    }
}
