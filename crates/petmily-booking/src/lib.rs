// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Petmily booking: the five-step walk booking wizard, walk pricing,
// subscription discounts, and the on-device booking history.

pub mod discount;
pub mod draft;
pub mod history;
pub mod integrity;
pub mod pricing;
pub mod profile;
pub mod steps;
pub mod subscription;
pub mod validation;
pub mod wizard;

pub use discount::{DiscountTable, DiscountTier, Discounted};
pub use draft::{BookingDraft, DraftUpdate};
pub use history::BookingHistory;
pub use pricing::{PriceLine, Pricing, PricingEngine, compute_price, format_won};
pub use profile::PetProfileStore;
pub use subscription::{SubscriptionForm, SubscriptionPlanner, SubscriptionQuote, SubscriptionSettings};
pub use validation::{StepReport, StepValidator, WizardStep};
pub use wizard::{BookingNavigator, ConfirmedBooking, WizardController};
