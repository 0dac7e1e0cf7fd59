// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::{DeliveryDay, PaymentMethod, SubscriptionCycle, WalkType};

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Walk type preselected on the basic-info step.
    pub default_walk_type: WalkType,
    /// Duration (minutes) preselected on the basic-info step.
    pub default_duration_minutes: u32,
    /// Payment method preselected on the payment step.
    pub default_payment_method: PaymentMethod,
    /// Cycle preselected in the subscription sheet.
    pub default_subscription_cycle: SubscriptionCycle,
    /// Delivery day preselected in the subscription sheet.
    pub default_delivery_day: DeliveryDay,
    /// Local storage key of the saved pet profile.
    pub pet_profile_key: String,
    /// Keep confirmed bookings in the on-device history.
    pub history_enabled: bool,
    /// Refuse to advance past a step whose required fields are empty.
    /// Off by default: the booking form only marks required fields.
    pub enforce_required_fields: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_walk_type: WalkType::Single,
            default_duration_minutes: crate::types::DEFAULT_DURATION_MINUTES,
            default_payment_method: PaymentMethod::Card,
            default_subscription_cycle: SubscriptionCycle::OneMonth,
            default_delivery_day: DeliveryDay::Monday,
            pet_profile_key: "petInfo".to_string(),
            history_enabled: true,
            enforce_required_fields: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"enforce_required_fields":true}"#).expect("parse");
        assert!(config.enforce_required_fields);
        assert_eq!(config.pet_profile_key, "petInfo");
        assert_eq!(config.default_duration_minutes, 60);
    }
}
