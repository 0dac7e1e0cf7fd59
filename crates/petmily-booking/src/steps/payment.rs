// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Step 4: payment method, insurance agreement, price breakdown.

use petmily_core::error::Result;
use petmily_core::types::PaymentMethod;

use super::Step;
use crate::draft::{BookingDraft, DraftUpdate};
use crate::pricing::{PriceLine, Pricing, PricingEngine};
use crate::validation::WizardStep;

#[derive(Debug, Clone, Default)]
pub struct PaymentStep {
    engine: PricingEngine,
}

impl Step for PaymentStep {
    const STEP: WizardStep = WizardStep::Payment;
}

impl PaymentStep {
    pub fn new(engine: PricingEngine) -> Self {
        Self { engine }
    }

    pub fn methods(&self) -> &'static [PaymentMethod] {
        &PaymentMethod::ALL
    }

    pub fn select_payment_method(&self, method: PaymentMethod) -> DraftUpdate {
        DraftUpdate::new().with_payment_method(method)
    }

    /// Insurance is bundled; agreeing does not change the price.
    pub fn set_insurance_agreed(&self, agreed: bool) -> DraftUpdate {
        DraftUpdate::new().with_insurance_agreed(agreed)
    }

    pub fn toggle_insurance(&self, draft: &BookingDraft) -> DraftUpdate {
        self.set_insurance_agreed(!draft.insurance_agreed)
    }

    pub fn quote(&self, draft: &BookingDraft) -> Result<Pricing> {
        self.engine.compute_price(draft.duration_minutes, draft.walk_type)
    }

    pub fn price_lines(&self, draft: &BookingDraft) -> Result<Vec<PriceLine>> {
        self.engine.price_lines(draft.duration_minutes, draft.walk_type)
    }
}
